pub mod scout;
