use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{CityCmd, CityCosts, DailyCostSet, Engine, Principal};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// The CLI works with direct database access and acts as a local operator.
const OPERATOR: &str = "wayfare_admin";

#[derive(Parser, Debug)]
#[command(name = "wayfare_admin")]
#[command(about = "Admin utilities for Wayfare (bootstrap users and cities)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./wayfare.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    City(City),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
    Flags(UserFlagsArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    /// Grant the admin role.
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct UserFlagsArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    admin: Option<bool>,
    #[arg(long)]
    premium: Option<bool>,
}

#[derive(Args, Debug)]
struct City {
    #[command(subcommand)]
    command: CityCommand,
}

#[derive(Subcommand, Debug)]
enum CityCommand {
    Create(CityCreateArgs),
    List(CityListArgs),
}

#[derive(Args, Debug)]
struct CityCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    country: String,
    /// ISO 3166-1 alpha-2, e.g. `PT`.
    #[arg(long)]
    country_code: String,
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
    #[arg(long, default_value = "EUR")]
    currency: String,
    /// Daily costs as `accommodation,food,transport,activities`.
    #[arg(long, value_parser = parse_daily_costs)]
    budget: DailyCostSet,
    #[arg(long, value_parser = parse_daily_costs)]
    mid_range: DailyCostSet,
    #[arg(long, value_parser = parse_daily_costs)]
    luxury: DailyCostSet,
    #[arg(long)]
    tips: Option<String>,
    #[arg(long)]
    transport_info: Option<String>,
    #[arg(long)]
    cash_info: Option<String>,
}

#[derive(Args, Debug)]
struct CityListArgs {
    /// Filter by name.
    #[arg(long)]
    search: Option<String>,
}

fn parse_daily_costs(raw: &str) -> Result<DailyCostSet, String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid cost {part:?}: {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        [accommodation, food, transport, activities] => Ok(DailyCostSet::new(
            *accommodation,
            *food,
            *transport,
            *activities,
        )),
        _ => Err("expected 4 comma separated values".to_string()),
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;
    let operator = Principal::new(OPERATOR).admin();

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;
            let user = engine
                .create_user(&args.username, &password, args.admin)
                .await?;
            println!("created user: {}", user.username);
        }
        Command::User(User {
            command: UserCommand::Flags(args),
        }) => {
            if args.admin.is_none() && args.premium.is_none() {
                eprintln!("nothing to change: pass --admin and/or --premium");
                std::process::exit(2);
            }
            let user = engine
                .set_user_flags(&args.username, args.admin, args.premium, &operator)
                .await?;
            println!(
                "{}: admin={} premium={}",
                user.username, user.is_admin, user.is_premium
            );
        }
        Command::City(City {
            command: CityCommand::Create(args),
        }) => {
            let mut cmd = CityCmd::new(
                args.name,
                args.country,
                args.country_code,
                (args.latitude, args.longitude),
                args.currency,
                CityCosts {
                    budget: args.budget,
                    mid_range: args.mid_range,
                    luxury: args.luxury,
                },
            );
            cmd.tips = args.tips;
            cmd.transport_info = args.transport_info;
            cmd.cash_info = args.cash_info;

            let city = engine.create_city(cmd, &operator).await?;
            println!("created city: {} ({})", city.name, city.id);
        }
        Command::City(City {
            command: CityCommand::List(args),
        }) => {
            for listing in engine.list_cities(args.search.as_deref(), None).await? {
                let city = listing.city;
                println!(
                    "{}\t{}, {}\t{}",
                    city.id,
                    city.name,
                    city.country_code,
                    city.flag().unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
