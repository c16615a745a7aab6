//! Localized user-facing texts
//!
//! Only the strings the core emits itself live here: notification titles and
//! the fallback messages used when the server does not explain a failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Severity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

/// Keys of the texts the core can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SignUpSuccess,
    SignUpFailed,
    SignInSuccess,
    SignInFailed,
    LoggedOut,
    SessionExpired,
    AccountsLoadFailed,
    TransfersLoadFailed,
    TransferFailed,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Default notification title for a severity
    pub fn title(&self, severity: Severity) -> &'static str {
        match (self, severity) {
            (Locale::En, Severity::Success) => "Success",
            (Locale::En, Severity::Error) => "Error",
            (Locale::En, Severity::Info) => "Info",
            (Locale::En, Severity::Warning) => "Warning",
            (Locale::PtBr, Severity::Success) => "Sucesso",
            (Locale::PtBr, Severity::Error) => "Erro",
            (Locale::PtBr, Severity::Info) => "Informação",
            (Locale::PtBr, Severity::Warning) => "Atenção",
        }
    }

    pub fn text(&self, message: Message) -> &'static str {
        match self {
            Locale::En => match message {
                Message::SignUpSuccess => "Account created. Welcome!",
                Message::SignUpFailed => "Registration failed. Please try again.",
                Message::SignInSuccess => "Signed in successfully.",
                Message::SignInFailed => "Sign in failed. Check your email and password.",
                Message::LoggedOut => "You have been signed out.",
                Message::SessionExpired => "Your session has expired. Please sign in again.",
                Message::AccountsLoadFailed => "Could not load bank accounts.",
                Message::TransfersLoadFailed => "Could not load transfers.",
                Message::TransferFailed => "Could not complete the transfer.",
            },
            Locale::PtBr => match message {
                Message::SignUpSuccess => "Conta criada. Bem-vindo!",
                Message::SignUpFailed => "Falha ao registrar. Tente novamente.",
                Message::SignInSuccess => "Login realizado com sucesso.",
                Message::SignInFailed => "Falha ao entrar. Verifique seu e-mail e senha.",
                Message::LoggedOut => "Você saiu da sua conta.",
                Message::SessionExpired => "Sua sessão expirou. Faça login novamente.",
                Message::AccountsLoadFailed => "Erro ao carregar contas bancárias",
                Message::TransfersLoadFailed => "Erro ao carregar transferências",
                Message::TransferFailed => "Erro ao realizar transferência",
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}
