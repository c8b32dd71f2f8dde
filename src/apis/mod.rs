pub mod tasty;
