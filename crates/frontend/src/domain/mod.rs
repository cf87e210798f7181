pub mod order_queue;
