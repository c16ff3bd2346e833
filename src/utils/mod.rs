pub mod repository_filter;
