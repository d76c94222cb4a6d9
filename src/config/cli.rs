use crate::config::ConfigOverrides;
use crate::domain::model::{
    BirthProfile, BookingRequest, Gender, ProfileUpdate, RegisterRequest, TestimonialRequest,
};
use crate::utils::error::Result;
use crate::utils::validation::{parse_date, parse_time, validate_non_empty_string};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};

pub const PASSWORD_ENV: &str = "ASTRO_PASSWORD";
pub const NEW_PASSWORD_ENV: &str = "ASTRO_NEW_PASSWORD";

#[derive(Debug, Clone, Parser)]
#[command(name = "astro-portal")]
#[command(about = "Command line client for the astrology consultation service")]
pub struct CliConfig {
    /// Backend base URL, e.g. https://example.com/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Optional TOML config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub session_path: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true)]
    pub retries: Option<u32>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            timeout_seconds: self.timeout_seconds,
            max_retries: self.retries,
            session_path: self.session_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Read from stdin when neither the flag nor ASTRO_PASSWORD is set
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    Register(RegisterArgs),
    VerifyEmail {
        #[arg(long)]
        token: String,
    },
    ResendVerification {
        #[arg(long)]
        email: String,
    },
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        /// Token from the reset email
        #[arg(long)]
        token: String,
        #[arg(long, env = NEW_PASSWORD_ENV, hide_env_values = true)]
        new_password: Option<String>,
    },
    /// Show your profile, or update it when any field is given (requires login)
    Profile(ProfileArgs),
    /// Requires login
    ChangePassword {
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        current_password: Option<String>,
        #[arg(long, env = NEW_PASSWORD_ENV, hide_env_values = true)]
        new_password: Option<String>,
    },
    Services {
        /// Show a single service
        #[arg(long)]
        id: Option<u32>,
    },
    Blogs {
        #[arg(long)]
        id: Option<u32>,
    },
    Horoscopes {
        #[arg(long)]
        id: Option<u32>,
    },
    Panchang {
        /// YYYY-MM-DD; today's panchang when omitted
        #[arg(long)]
        date: Option<String>,
    },
    Testimonials,
    AddTestimonial(TestimonialArgs),
    Faqs,
    /// Book a consultation (requires login)
    Book(BookArgs),
    /// List your bookings (requires login)
    Bookings,
    /// Requires login
    ConfirmBooking {
        #[arg(long)]
        id: u64,
    },
    Kundli(BirthArgs),
    Dosha(BirthArgs),
    Gemstone(BirthArgs),
    MoonSign(BirthArgs),
    Ascendant(BirthArgs),
    Matching(MatchingArgs),
    Rudraksha {
        #[command(flatten)]
        birth: BirthArgs,
        /// Comma separated, e.g. "Health Issues,Mental Peace"
        #[arg(long, value_delimiter = ',')]
        problems: Vec<String>,
    },
    Numerology {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BirthArgs {
    #[arg(long)]
    pub name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub place: String,
    #[arg(long)]
    pub gender: Option<Gender>,
}

impl BirthArgs {
    pub fn to_profile(&self) -> Result<BirthProfile> {
        birth_profile(&self.name, &self.date, &self.time, &self.place, self.gender)
    }
}

fn birth_profile(
    name: &str,
    date: &str,
    time: &str,
    place: &str,
    gender: Option<Gender>,
) -> Result<BirthProfile> {
    validate_non_empty_string("Name", name)?;
    validate_non_empty_string("Birth place", place)?;
    Ok(BirthProfile {
        name: name.trim().to_string(),
        birth_date: parse_date(date)?,
        birth_time: parse_time(time)?,
        birth_place: place.trim().to_string(),
        gender,
    })
}

#[derive(Debug, Clone, Args)]
pub struct MatchingArgs {
    #[arg(long)]
    pub male_name: String,
    #[arg(long)]
    pub male_date: String,
    #[arg(long)]
    pub male_time: String,
    #[arg(long)]
    pub male_place: String,
    #[arg(long)]
    pub female_name: String,
    #[arg(long)]
    pub female_date: String,
    #[arg(long)]
    pub female_time: String,
    #[arg(long)]
    pub female_place: String,
}

impl MatchingArgs {
    pub fn to_profiles(&self) -> Result<(BirthProfile, BirthProfile)> {
        let male = birth_profile(
            &self.male_name,
            &self.male_date,
            &self.male_time,
            &self.male_place,
            Some(Gender::Male),
        )?;
        let female = birth_profile(
            &self.female_name,
            &self.female_date,
            &self.female_time,
            &self.female_place,
            Some(Gender::Female),
        )?;
        Ok((male, female))
    }
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    /// Read from stdin when neither the flag nor ASTRO_PASSWORD is set
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,
    /// Create an admin account
    #[arg(long)]
    pub admin: bool,
}

impl RegisterArgs {
    pub fn to_request(&self, password: String) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            password,
            preferred_language: self.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
}

impl From<&ProfileArgs> for ProfileUpdate {
    fn from(args: &ProfileArgs) -> Self {
        ProfileUpdate {
            full_name: args.full_name.clone(),
            phone: args.phone.clone(),
            preferred_language: args.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TestimonialArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub content: String,
    /// 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,
}

impl TestimonialArgs {
    pub fn to_request(&self) -> Result<TestimonialRequest> {
        validate_non_empty_string("Name", &self.name)?;
        validate_non_empty_string("Testimonial", &self.content)?;
        Ok(TestimonialRequest {
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
            rating: self.rating,
        })
    }
}

/// A secret passed by flag or environment, otherwise one line read from stdin.
pub fn secret_or_stdin(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(value) => {
            validate_non_empty_string(field, &value)?;
            Ok(value)
        }
        None => {
            eprint!("{}: ", field);
            std::io::stderr().flush()?;
            read_secret(std::io::stdin().lock(), field)
        }
    }
}

pub fn read_secret<R: BufRead>(mut reader: R, field: &str) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let secret = line.trim_end_matches(['\r', '\n']).to_string();
    validate_non_empty_string(field, &secret)?;
    Ok(secret)
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub service_id: u32,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub birth_time: Option<String>,
    #[arg(long)]
    pub birth_place: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<&BookArgs> for BookingRequest {
    fn from(args: &BookArgs) -> Self {
        BookingRequest {
            service_id: args.service_id,
            booking_date: args.date.clone(),
            booking_time: args.time.clone(),
            customer_name: args.name.clone(),
            customer_email: args.email.clone(),
            customer_phone: args.phone.clone(),
            birth_date: args.birth_date.clone(),
            birth_time: args.birth_time.clone(),
            birth_place: args.birth_place.clone(),
            notes: args.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dosha_command() {
        let cli = CliConfig::try_parse_from([
            "astro-portal",
            "dosha",
            "--name",
            "Asha",
            "--date",
            "1990-06-15",
            "--time",
            "10:00",
            "--place",
            "Kolkata",
        ])
        .unwrap();

        match cli.command {
            Command::Dosha(args) => {
                let profile = args.to_profile().unwrap();
                assert_eq!(profile.birth_date.to_string(), "1990-06-15");
                assert_eq!(profile.gender, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "astro-portal",
            "services",
            "--api-url",
            "http://example.com/api",
            "--retries",
            "2",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.api_url.as_deref(), Some("http://example.com/api"));
        assert_eq!(overrides.max_retries, Some(2));
    }

    #[test]
    fn test_rudraksha_problems_are_split() {
        let cli = CliConfig::try_parse_from([
            "astro-portal",
            "rudraksha",
            "--name",
            "Ravi",
            "--date",
            "1985-01-02",
            "--time",
            "06:30",
            "--place",
            "Pune",
            "--gender",
            "male",
            "--problems",
            "Health Issues,Mental Peace",
        ])
        .unwrap();

        match cli.command {
            Command::Rudraksha { birth, problems } => {
                assert_eq!(birth.gender, Some(Gender::Male));
                assert_eq!(problems, vec!["Health Issues", "Mental Peace"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_password_is_optional_on_the_command_line() {
        let cli =
            CliConfig::try_parse_from(["astro-portal", "login", "--username", "asha"]).unwrap();

        match cli.command {
            Command::Login { username, password } => {
                assert_eq!(username, "asha");
                if std::env::var(PASSWORD_ENV).is_err() {
                    assert_eq!(password, None);
                }
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_secret_is_read_from_one_line() {
        let input = std::io::Cursor::new("s3cret pass\nnext line\n");
        assert_eq!(read_secret(input, "Password").unwrap(), "s3cret pass");

        let crlf = std::io::Cursor::new("hunter2\r\n");
        assert_eq!(read_secret(crlf, "Password").unwrap(), "hunter2");
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = read_secret(std::io::Cursor::new("\n"), "Password").unwrap_err();
        assert_eq!(err.user_friendly_message(), "Password is required");
        assert!(read_secret(std::io::Cursor::new(""), "Password").is_err());
    }

    #[test]
    fn test_given_secret_skips_stdin() {
        let secret = secret_or_stdin(Some("from-env".to_string()), "Password").unwrap();
        assert_eq!(secret, "from-env");
    }

    #[test]
    fn test_register_admin_flag_and_language() {
        let cli = CliConfig::try_parse_from([
            "astro-portal",
            "register",
            "--email",
            "asha@example.com",
            "--username",
            "asha",
            "--full-name",
            "Asha Rao",
            "--language",
            "hindi",
            "--admin",
        ])
        .unwrap();

        match cli.command {
            Command::Register(args) => {
                assert!(args.admin);
                let request = args.to_request("pw".to_string());
                assert_eq!(request.preferred_language.as_deref(), Some("hindi"));
                assert_eq!(request.password, "pw");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_content_item_by_id() {
        let cli =
            CliConfig::try_parse_from(["astro-portal", "blogs", "--id", "7"]).unwrap();
        assert!(matches!(cli.command, Command::Blogs { id: Some(7) }));

        let cli = CliConfig::try_parse_from(["astro-portal", "horoscopes"]).unwrap();
        assert!(matches!(cli.command, Command::Horoscopes { id: None }));
    }

    #[test]
    fn test_testimonial_rating_is_bounded() {
        let parsed = CliConfig::try_parse_from([
            "astro-portal",
            "add-testimonial",
            "--name",
            "Asha",
            "--content",
            "Helpful reading",
            "--rating",
            "6",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_kundli_command_builds_profile() {
        let cli = CliConfig::try_parse_from([
            "astro-portal",
            "kundli",
            "--name",
            "Asha",
            "--date",
            "1990-06-15",
            "--time",
            "10:00",
            "--place",
            "Kolkata",
        ])
        .unwrap();
        match cli.command {
            Command::Kundli(args) => assert_eq!(args.to_profile().unwrap().name, "Asha"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_birth_time_is_rejected() {
        let args = BirthArgs {
            name: "Asha".to_string(),
            date: "1990-06-15".to_string(),
            time: "noon".to_string(),
            place: "Kolkata".to_string(),
            gender: None,
        };
        assert!(args.to_profile().is_err());
    }
}
