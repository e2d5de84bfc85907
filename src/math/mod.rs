mod aabb;

pub use aabb::Aabb;
