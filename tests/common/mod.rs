pub mod synthetic_shapes;
