pub mod ask;
pub mod index;
pub mod upload;
