pub mod dary_heap;
