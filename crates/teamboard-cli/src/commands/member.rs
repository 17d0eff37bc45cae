use clap::Subcommand;
use teamboard_core::Role;

use super::{open_ledger, print_json, CliResult};

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member to the roster
    Add {
        /// Member name
        name: String,
        /// Role: "member" or "leader"
        #[arg(long, default_value = "member")]
        role: String,
    },
    /// List roster profiles
    List,
    /// Set a member's recruit count
    Recruits {
        /// Member name
        name: String,
        /// Number of recruits
        count: u32,
    },
}

pub fn run(action: MemberAction) -> CliResult {
    let ledger = open_ledger()?;

    match action {
        MemberAction::Add { name, role } => {
            let role = Role::parse(&role)?;
            ledger.add_member(&name, role)?;
            println!("member added: {}", name.trim());
        }
        MemberAction::List => {
            print_json(&ledger.members()?)?;
        }
        MemberAction::Recruits { name, count } => {
            ledger.set_recruit_count(&name, count)?;
            println!("ok");
        }
    }
    Ok(())
}
