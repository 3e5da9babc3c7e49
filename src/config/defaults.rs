//! Built-in defaults used when the configuration file leaves a setting out.

/// Timeout for plain HTTP fetches.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
/// Navigation timeout for the headless browser.
pub const BROWSER_TIMEOUT_SECS: u64 = 120;
pub const USER_AGENT: &str = "SkillDiff/0.1";
pub const BROWSER_HEADLESS: bool = true;
pub const BROWSER_ARGS: &[&str] = &["--no-sandbox", "--disable-setuid-sandbox"];
pub const CONCURRENT_REQUESTS: usize = 4;
pub const OUTPUT_FILE_STEM: &str = "job_links";

pub const JOB_PATTERNS: &[&str] = &[
    r"/jobs/",
    r"/careers/",
    r"/openings/",
    r"/positions/",
    r"/opportunities/",
    r"/vacancies/",
    r"/work-with-us/",
    r"/join-us/",
    r"/job-search/",
    r"/apply/",
    r"/hiring/",
    r"/employment/",
];

pub const JOB_BOARDS: &[&str] = &[
    "ashbyhq.com",
    "lever.co",
    "greenhouse.io",
    "workday.com",
    "jobvite.com",
    "smartrecruiters.com",
    "bamboohr.com",
    "icims.com",
    "taleo.net",
    "successfactors.com",
    "workable.com",
    "applytojob.com",
    "recruitee.com",
    "teamtailor.com",
];

pub const EXCLUDES: &[&str] = &[
    r"#",
    r"javascript:",
    r"mailto:",
    r"\.(pdf|doc|docx|jpg|jpeg|png|gif|svg|css|js|ico)$",
    r"/(about|contact|privacy|terms|blog|news|press|media)/",
    r"/feed/",
    r"/search\?",
    r"/login",
];

pub const JOB_QUERY_PATTERNS: &[&str] = &[
    r"job_id=",
    r"jobid=",
    r"gh_jid=",
    r"lever-job=",
    r"workday-job=",
    r"position=",
    r"req_id=",
    r"posting=",
];

pub fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
