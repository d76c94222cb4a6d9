use astro_portal::config::cli::secret_or_stdin;
use astro_portal::config::toml_config::TomlConfig;
use astro_portal::domain::model::{
    ApiResult, BookingRequest, Computed, PasswordChange, ProfileUpdate,
};
use astro_portal::domain::ports::SessionStore;
use astro_portal::utils::error::{ErrorSeverity, PortalError};
use astro_portal::utils::logger;
use astro_portal::utils::validation::{parse_date, Validate};
use astro_portal::{
    ApiClient, BookingController, CalculatorController, CliConfig, Command, FileSessionStore,
    PortalConfig, Result,
};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;

const ESTIMATE_DISCLAIMER: &str = "Approximate result, backend unavailable.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file_config) => file_config,
        Err(e) => exit_with(&e),
    };

    if cli.json_logs || file_config.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Some(file_config) = &file_config {
        if let Err(e) = file_config.validate() {
            tracing::error!("Config file validation failed: {}", e);
            exit_with(&e);
        }
    }

    let config = PortalConfig::resolve(cli.overrides(), file_config.as_ref());
    tracing::debug!("Resolved config: {:?}", config);
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &PortalError) -> ! {
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

async fn run(command: Command, config: &PortalConfig) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = FileSessionStore::from_config(config);
    let mut session = store.load().await?;

    match command {
        Command::Login { username, password } => {
            let password = secret_or_stdin(password, "Password")?;
            session.login(&client, &username, &password).await?;
            store.save(&session).await?;
            println!("Logged in as {}", username);
        }
        Command::Logout => {
            session.logout();
            store.clear().await?;
            println!("Logged out");
        }
        Command::Whoami => {
            session.require_token()?;
            if session.verify(&client).await {
                store.save(&session).await?;
                print_json(&session.user)?;
            } else {
                store.clear().await?;
                return Err(PortalError::AuthRequired {
                    message: "stored session is no longer valid".to_string(),
                });
            }
        }
        Command::Register(args) => {
            let user = args.to_request(secret_or_stdin(args.password.clone(), "Password")?);
            let created = if args.admin {
                client.register_admin(&user).await
            } else {
                client.register(&user).await
            };
            print_json(&backend(created)?)?;
        }
        Command::VerifyEmail { token } => {
            print_json(&backend(client.verify_email(&token).await)?)?;
        }
        Command::ResendVerification { email } => {
            print_json(&backend(client.resend_verification(&email).await)?)?;
        }
        Command::ForgotPassword { email } => {
            print_json(&backend(client.forgot_password(&email).await)?)?;
        }
        Command::ResetPassword {
            token,
            new_password,
        } => {
            let new_password = secret_or_stdin(new_password, "New password")?;
            print_json(&backend(client.reset_password(&token, &new_password).await)?)?;
        }
        Command::Profile(args) => {
            let token = session.require_token()?;
            let update = ProfileUpdate::from(&args);
            let profile = if update.is_empty() {
                client.current_user(token).await
            } else {
                client.update_profile(token, &update).await
            };
            print_json(&backend(profile)?)?;
        }
        Command::ChangePassword {
            current_password,
            new_password,
        } => {
            let token = session.require_token()?;
            let current_password = secret_or_stdin(current_password, "Current password")?;
            let new_password = secret_or_stdin(new_password, "New password")?;
            let change = PasswordChange {
                current_password,
                confirm_password: new_password.clone(),
                new_password,
            };
            print_json(&backend(client.change_password(token, &change).await)?)?;
        }
        Command::Services { id } => {
            let data = match id {
                Some(id) => client.service(id).await,
                None => client.services().await,
            };
            print_json(&backend(data)?)?;
        }
        Command::Blogs { id } => {
            let data = match id {
                Some(id) => client.blog(id).await,
                None => client.blogs().await,
            };
            print_json(&backend(data)?)?;
        }
        Command::Horoscopes { id } => {
            let data = match id {
                Some(id) => client.horoscope(id).await,
                None => client.horoscopes().await,
            };
            print_json(&backend(data)?)?;
        }
        Command::Panchang { date } => {
            let data = match date {
                Some(date) => {
                    let date = parse_date(&date)?;
                    client
                        .panchang_by_date(&date.format("%Y-%m-%d").to_string())
                        .await
                }
                None => client.panchang().await,
            };
            print_json(&backend(data)?)?;
        }
        Command::Testimonials => print_json(&backend(client.testimonials().await)?)?,
        Command::AddTestimonial(args) => {
            let testimonial = args.to_request()?;
            print_json(&backend(client.create_testimonial(&testimonial).await)?)?;
        }
        Command::Faqs => print_json(&backend(client.faqs().await)?)?,
        Command::Book(args) => {
            let mut form = BookingRequest::from(&args);
            let confirmation = BookingController::new(&client)
                .submit(&session, &mut form)
                .await?;
            println!("{}", confirmation.message);
        }
        Command::Bookings => {
            let token = session.require_token()?;
            print_json(&backend(client.bookings(token).await)?)?;
        }
        Command::ConfirmBooking { id } => {
            let token = session.require_token()?;
            print_json(&backend(client.confirm_booking(token, id).await)?)?;
        }
        Command::Kundli(args) => {
            let profile = args.to_profile()?;
            let computed = CalculatorController::new(&client).kundli(&profile).await?;
            print_computed(&computed)?;
        }
        Command::Dosha(args) => {
            let profile = args.to_profile()?;
            let computed = CalculatorController::new(&client).dosha(&profile).await?;
            print_computed(&computed)?;
        }
        Command::Gemstone(args) => {
            let profile = args.to_profile()?;
            let computed = CalculatorController::new(&client).gemstone(&profile).await?;
            print_computed(&computed)?;
        }
        Command::MoonSign(args) => {
            let profile = args.to_profile()?;
            let computed = CalculatorController::new(&client).moon_sign(&profile).await?;
            print_computed(&computed)?;
        }
        Command::Ascendant(args) => {
            let profile = args.to_profile()?;
            let computed = CalculatorController::new(&client).ascendant(&profile).await?;
            print_computed(&computed)?;
        }
        Command::Matching(args) => {
            let (male, female) = args.to_profiles()?;
            let computed = CalculatorController::new(&client)
                .horoscope_matching(&male, &female)
                .await?;
            print_computed(&computed)?;
        }
        Command::Rudraksha { birth, problems } => {
            let profile = birth.to_profile()?;
            let computed = CalculatorController::new(&client)
                .rudraksha(&profile, &problems)
                .await?;
            print_computed(&computed)?;
        }
        Command::Numerology { name, date } => {
            let birth_date = parse_date(&date)?;
            let computed = CalculatorController::new(&client)
                .numerology(&name, birth_date)
                .await?;
            print_computed(&computed)?;
        }
    }

    Ok(())
}

fn backend(result: ApiResult<Value>) -> Result<Value> {
    result
        .into_result()
        .map_err(|message| PortalError::BackendError { message })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_computed(computed: &Computed<Value>) -> Result<()> {
    if computed.is_estimate() {
        eprintln!("{}", ESTIMATE_DISCLAIMER);
    }
    print_json(&computed.result)
}
