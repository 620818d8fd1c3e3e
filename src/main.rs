use anyhow::Context;
use clap::Parser;
use group_swipe::models::session::CreateSessionInput;
use group_swipe::models::vote::Decision;
use group_swipe::{Config, HttpSessionApi, RequestFailure, SessionStore, SessionView, Transition};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  create <host> | <location> [| cuisine | price | miles]
  join <room code> <name>
  refresh | start | next | yes | no | show | leave | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let api = HttpSessionApi::from_config(&config).context("building HTTP client")?;
    info!("Using session service at {}", api.base_url());
    let store = SessionStore::new(api);

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let result = match command {
            "create" => match parse_create(rest) {
                Some(input) => store.create(&input).await,
                None => {
                    println!("usage: create <host> | <location> [| cuisine | price | miles]");
                    continue;
                }
            },
            "join" => match rest.trim().split_once(' ') {
                Some((code, name)) => store.join(code, name).await,
                None => {
                    println!("usage: join <room code> <name>");
                    continue;
                }
            },
            "refresh" => store.refresh().await,
            "start" => store.start().await,
            "next" => store.load_next_candidate().await,
            "yes" => store.vote(Decision::Yes).await,
            "no" => store.vote(Decision::No).await,
            "leave" => {
                store.leave();
                Ok(Transition::Applied)
            }
            "show" => Ok(Transition::Applied),
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {}", other);
                continue;
            }
        };
        report(result, &store.view());
    }

    Ok(())
}

fn parse_create(rest: &str) -> Option<CreateSessionInput> {
    let mut fields = rest.split('|').map(str::trim);
    let host_name = fields.next().filter(|h| !h.is_empty())?.to_owned();
    let location_text = fields.next()?.to_owned();
    let cuisine = fields.next().map(str::to_owned);
    let price = fields.next().map(str::to_owned);
    let radius_miles = match fields.next() {
        Some(miles) if !miles.is_empty() => Some(miles.parse().ok()?),
        _ => None,
    };
    Some(CreateSessionInput {
        host_name,
        location_text,
        cuisine,
        price,
        radius_miles,
        radius_meters: None,
    })
}

fn report(result: Result<Transition, RequestFailure>, view: &SessionView) {
    match result {
        Ok(Transition::Skipped) => println!("nothing to do yet"),
        Ok(_) => {}
        Err(_) => {
            if let Some(message) = &view.error {
                println!("error: {}", message);
            }
        }
    }

    match &view.session {
        Some(session) => {
            println!(
                "room {} [{:?}] host {}{} | participants: {}",
                session.room_code,
                session.status,
                session.host_name,
                if view.is_host() { " (you)" } else { "" },
                session.participants.join(", ")
            );
        }
        None => println!("no session"),
    }
    if let Some(vote) = &view.latest_vote {
        if vote.matched {
            println!("match on restaurant {:?}!", vote.matched_restaurant_id);
        } else {
            println!(
                "votes {}/{} ({} yes){}",
                vote.votes_submitted_for_restaurant,
                vote.total_participants,
                vote.yes_votes_for_restaurant,
                if vote.duplicate { " (already voted)" } else { "" }
            );
        }
    }
    match &view.current_candidate {
        Some(c) => println!(
            "now showing #{} {} {} {}",
            c.id,
            c.name.as_deref().unwrap_or("(unnamed)"),
            c.price.as_deref().unwrap_or(""),
            c.rating.map(|r| format!("{:.1}*", r)).unwrap_or_default()
        ),
        None if view.session.is_some() => println!("no restaurant on screen"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_line_parses_optional_fields() {
        let input = parse_create("Ann | Austin, TX | tacos | $$ | 2").unwrap();
        assert_eq!(input.host_name, "Ann");
        assert_eq!(input.location_text, "Austin, TX");
        assert_eq!(input.cuisine.as_deref(), Some("tacos"));
        assert_eq!(input.radius_miles, Some(2.0));
        assert_eq!(input.normalize().radius_meters, Some(3219));

        let input = parse_create("Ann | Austin").unwrap();
        assert!(input.cuisine.is_none());
        assert!(input.radius_miles.is_none());
    }

    #[test]
    fn create_line_rejects_missing_location_or_bad_miles() {
        assert!(parse_create("Ann").is_none());
        assert!(parse_create(" | Austin").is_none());
        assert!(parse_create("Ann | Austin | | | far").is_none());
    }
}
