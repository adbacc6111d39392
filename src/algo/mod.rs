pub mod mst;
pub mod union_find;
