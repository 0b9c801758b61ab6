use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum UserCmd {
    #[command(
        about = "Add or update a user",
        long_about = "Register a user. Usernames are matched case-insensitively."
    )]
    Add {
        #[arg(long, value_name = "USER")]
        username: String,
        #[arg(long, default_value_t = false, help = "Grant administration rights")]
        admin: bool,
    },
}
