//! Command enum for the `acctmgr <verb> cluster [tokens]` interface.
//!
//! The Command enum is the source of truth for the verbs the tool accepts
//! and backs both the parser and help output.

/// Record type a verb applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Cluster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create clusters: names plus shared default limits.
    Add(Entity, Vec<String>),

    /// Show clusters matching an optional condition.
    List(Entity, Vec<String>),

    /// Change limits: `[Where] <condition> Set <assignments>`.
    Modify(Entity, Vec<String>),

    /// Remove clusters matching a mandatory condition.
    Delete(Entity, Vec<String>),

    /// Show help, optionally for one verb.
    Help(Option<String>),

    /// Show version.
    Version,

    /// Leave interactive mode.
    Quit,
}

impl Command {
    /// Get the command name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add(..) => "add",
            Command::List(..) => "list",
            Command::Modify(..) => "modify",
            Command::Delete(..) => "delete",
            Command::Help(_) => "help",
            Command::Version => "version",
            Command::Quit => "quit",
        }
    }

    /// Get a short description of the command.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Add(..) => "Add clusters with optional default limits",
            Command::List(..) => "List clusters (all, or those matching names)",
            Command::Modify(..) => "Change default limits of matching clusters",
            Command::Delete(..) => "Delete matching clusters and their root associations",
            Command::Help(_) => "Show help",
            Command::Version => "Show version",
            Command::Quit => "Leave interactive mode",
        }
    }

    /// Long help for one verb.
    pub fn format_command_help(verb: &str) -> Option<&'static str> {
        match verb.to_ascii_lowercase().as_str() {
            "add" | "create" => Some(ADD_HELP),
            "list" | "show" => Some(LIST_HELP),
            "modify" | "update" => Some(MODIFY_HELP),
            "delete" | "remove" => Some(DELETE_HELP),
            _ => None,
        }
    }

    /// Main help text.
    pub fn format_help() -> String {
        let verbs = [
            Command::Add(Entity::Cluster, Vec::new()),
            Command::List(Entity::Cluster, Vec::new()),
            Command::Modify(Entity::Cluster, Vec::new()),
            Command::Delete(Entity::Cluster, Vec::new()),
        ];
        let mut out = String::from(
            "acctmgr - cluster administration for resource accounting\n\n\
             Usage: acctmgr [OPTIONS] <verb> cluster [tokens...]\n\
             \x20      acctmgr [OPTIONS]            (interactive mode)\n\nCommands:\n",
        );
        for cmd in &verbs {
            out.push_str(&format!("  {:<10} {}\n", cmd.name(), cmd.description()));
        }
        out.push_str(
            "\nLimits: FairShare= MaxJobs= MaxNodes= MaxWall= MaxCPUSecs=\n\
             Keywords may be abbreviated and are case-insensitive.\n\n\
             Run 'acctmgr help <verb>' for details, 'acctmgr --help' for options.\n",
        );
        out
    }
}

const ADD_HELP: &str = "acctmgr add cluster <name>... [Names=<name>] [limit=<value>]...\n\n\
Adds every named cluster that does not already exist. Limits given on the\n\
line become the defaults of each new cluster and of its root association.\n\n\
Example:\n  acctmgr add cluster alpha beta FairShare=10 MaxJobs=500\n";

const LIST_HELP: &str = "acctmgr list cluster [[Where] <name>... | Names=<name>]\n\n\
Lists clusters; without names every cluster is shown. Use --long for limits,\n\
--parsable or --json for machine-readable output.\n";

const MODIFY_HELP: &str = "acctmgr modify cluster [Where] <name>... Set <limit>=<value>...\n\n\
Changes the default limits of the selected clusters. A value of 0 or less\n\
resets the limit. Without a Where clause every cluster is affected after an\n\
extra confirmation.\n\n\
Example:\n  acctmgr modify cluster where alpha set MaxWall=1440\n";

const DELETE_HELP: &str = "acctmgr delete cluster [Where] <name>...\n\n\
Deletes the selected clusters together with their root associations. At\n\
least one name is required.\n";
