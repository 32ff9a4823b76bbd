use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use warden_application::LoginState;
use warden_core::{AppError, AppResult};

use crate::console_services::ConsoleServices;
use crate::output::print_json;

const CHANGE_NUMBER: &str = "change";

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, question: &str) -> AppResult<String> {
        eprint!("{question}");
        std::io::stderr()
            .flush()
            .map_err(|error| AppError::Internal(format!("failed to write prompt: {error}")))?;

        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line.trim().to_owned()),
            Ok(None) => Err(AppError::Validation(
                "login aborted: input closed".to_owned(),
            )),
            Err(error) => Err(AppError::Internal(format!("failed to read input: {error}"))),
        }
    }
}

pub async fn login(services: &ConsoleServices, phone: Option<String>) -> AppResult<()> {
    let mut flow = services.login_flow();
    let mut prompt = Prompt::stdin();
    let mut pending_phone = phone;

    loop {
        match flow.state().clone() {
            LoginState::AwaitingPhone => {
                let phone = match pending_phone.take() {
                    Some(phone) => phone,
                    None => prompt.ask("Phone number: ").await?,
                };
                if flow.submit_phone(phone.as_str()).await.is_err() {
                    eprintln!("{}", flow.error().unwrap_or("Failed to send OTP"));
                }
            }
            LoginState::AwaitingCode { phone } => {
                let question = format!(
                    "Passcode sent to {phone} (type '{CHANGE_NUMBER}' to use another number): "
                );
                let code = prompt.ask(question.as_str()).await?;
                if code.eq_ignore_ascii_case(CHANGE_NUMBER) {
                    flow.change_number()?;
                    continue;
                }

                let verified = flow
                    .submit_code(code.as_str())
                    .await
                    .map(|session| session.identity().clone());
                match verified {
                    Ok(identity) => return print_json(&identity),
                    Err(error @ AppError::Forbidden(_)) => return Err(error),
                    Err(_) => {
                        eprintln!("{}", flow.error().unwrap_or("Failed to verify OTP"));
                    }
                }
            }
            LoginState::Authenticated(session) => return print_json(session.identity()),
        }
    }
}

pub async fn logout(services: &ConsoleServices) -> AppResult<()> {
    let mut flow = services.login_flow();
    flow.logout().await?;
    eprintln!("Signed out.");
    Ok(())
}

pub async fn whoami(services: &ConsoleServices) -> AppResult<()> {
    let session = services.require_session().await?;
    print_json(session.identity())
}
