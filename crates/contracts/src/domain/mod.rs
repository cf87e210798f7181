pub mod csv;
pub mod order;
pub mod queue;
