pub(crate) mod gesture;
