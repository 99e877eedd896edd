mod codec;
mod common;
mod predicates;
