mod container;
mod support;
