pub mod alt;
pub mod collections;
pub mod dijkstra;
pub mod path;
