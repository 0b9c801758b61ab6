use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, value_name = "USER", help = "List as this user (anonymous when omitted)")]
    pub user: Option<String>,
    #[arg(
        long,
        value_name = "FIELD",
        help = "Sort by repository, description, owner or date (flat mode only)"
    )]
    pub sort: Option<String>,
    #[arg(long, default_value_t = false, conflicts_with = "desc", help = "Sort ascending")]
    pub asc: bool,
    #[arg(long, default_value_t = false, help = "Sort descending")]
    pub desc: bool,
    #[arg(long, default_value_t = 0usize, value_name = "N", help = "Zero-based page (flat mode only)")]
    pub page: usize,
    #[arg(long = "json", default_value_t = false, help = "Print JSON instead of a table")]
    pub json: bool,
}

impl ListArgs {
    pub fn ascending(&self) -> Option<bool> {
        match (self.asc, self.desc) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
