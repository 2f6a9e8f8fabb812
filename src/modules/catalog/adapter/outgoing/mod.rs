pub mod fs_image_storage;
pub mod product_query_postgres;
pub mod product_repository_postgres;
pub mod sea_orm_entity;
