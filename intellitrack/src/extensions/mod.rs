pub(crate) mod result_ext;
