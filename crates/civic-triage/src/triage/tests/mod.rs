mod common;
mod enricher;
