// src/core.rs
pub mod ignore;
pub mod scanner;
pub mod tokenizer;
