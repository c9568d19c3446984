pub mod module_matcher;
