pub mod site_config;

pub use site_config::SiteConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "studio-booking")]
#[command(about = "Appointment form and cookie consent tooling for the practice website")]
pub struct CliConfig {
    /// Path to the site TOML file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the time select options for a date
    Slots {
        #[arg(long)]
        date: String,
    },
    /// Validate a booking request and send it to the relay
    Submit(SubmitArgs),
    /// Inspect or change the stored cookie preferences
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
    /// Ask before following a tel: or mailto: link
    Contact { href: String },
    /// Print the site summary
    Info,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// support, diagnostic, psychotherapy or consultation
    #[arg(long, default_value = "")]
    pub service: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date: String,
    /// HH:MM
    #[arg(long, default_value = "")]
    pub time: String,
    #[arg(long)]
    pub message: Option<String>,
    /// Consent to the privacy policy
    #[arg(long)]
    pub privacy: bool,
    /// Extra hidden fields as key=value
    #[arg(long = "field", value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
    /// Validate only, do not contact the relay
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum ConsentAction {
    Show,
    AcceptAll,
    AcceptEssential,
    Custom {
        #[arg(long)]
        analytics: bool,
        #[arg(long)]
        calendly: bool,
    },
    Reset,
}

#[cfg(feature = "cli")]
fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[cfg(feature = "cli")]
impl SubmitArgs {
    pub fn to_form_data(&self) -> crate::core::FormData {
        let mut data = crate::core::FormData::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone", self.phone.as_str())
            .with("service", self.service.as_str())
            .with("date", self.date.as_str())
            .with("time", self.time.as_str())
            .with("message", self.message.clone().unwrap_or_default());
        if self.privacy {
            data.insert("privacy", "on");
        }
        for (key, value) in &self.extra {
            data.push(key.as_str(), value.as_str());
        }
        data
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_parse() {
        let cli = CliConfig::try_parse_from([
            "studio-booking",
            "submit",
            "--name",
            "Luca",
            "--privacy",
            "--field",
            "_subject=Prenotazione",
        ])
        .unwrap();

        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let data = args.to_form_data();
        assert_eq!(data.get("name"), Some("Luca"));
        assert_eq!(data.get("privacy"), Some("on"));
        assert_eq!(data.get("_subject"), Some("Prenotazione"));
        assert_eq!(data.get("email"), Some(""));
    }

    #[test]
    fn test_repeated_extra_field_kept() {
        let cli = CliConfig::try_parse_from([
            "studio-booking",
            "submit",
            "--field",
            "tag=ansia",
            "--field",
            "tag=sonno",
        ])
        .unwrap();

        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let tags: Vec<_> = args
            .to_form_data()
            .iter()
            .filter(|(k, _)| *k == "tag")
            .map(|(_, v)| v.to_string())
            .collect();
        assert_eq!(tags, vec!["ansia", "sonno"]);
    }

    #[test]
    fn test_bad_extra_field_rejected() {
        let result =
            CliConfig::try_parse_from(["studio-booking", "submit", "--field", "no-equals"]);
        assert!(result.is_err());
    }
}
