pub mod job_link_filter;

pub use job_link_filter::{FilterRules, JobLinkFilter};
