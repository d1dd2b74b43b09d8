//! Dashboard skins as data. A theme is a set of color tokens and copy
//! strings the frontend renders; picking a different skin is a config
//! change, not a component fork.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ThemeColors {
    pub background: &'static str,
    pub primary: &'static str,
    pub accent: &'static str,
    pub danger: &'static str,
    pub warning: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeCopy {
    pub title: &'static str,
    pub tagline: &'static str,
    pub connect_prompt: &'static str,
    pub vault_card: &'static str,
    pub wallet_card: &'static str,
    pub deposit_button: &'static str,
    pub withdraw_button: &'static str,
    pub initialize_button: &'static str,
    pub admin_warning: &'static str,
    pub footer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ThemeColors,
    pub copy: ThemeCopy,
}

impl Theme {
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "cyber" => Some(Self::cyber()),
            "aurora" => Some(Self::aurora()),
            _ => None,
        }
    }

    /// The default green-on-black terminal skin.
    pub fn cyber() -> Self {
        Self {
            name: "cyber",
            colors: ThemeColors {
                background: "#0a0a0f",
                primary: "#00ff41",
                accent: "#bf00ff",
                danger: "#ff0040",
                warning: "#ffff00",
            },
            copy: ThemeCopy {
                title: "SENTINEL VAULT",
                tagline: "DEVNET // v0.1.0",
                connect_prompt: "WALLET_NOT_CONNECTED // PLEASE AUTHENTICATE",
                vault_card: "DEPOSITED_IN_SENTINEL_VAULT",
                wallet_card: "AVAILABLE_FOR_DEPOSIT",
                deposit_button: "EXECUTE_DEPOSIT",
                withdraw_button: "EXECUTE_WITHDRAW",
                initialize_button: "INITIALIZE_VAULT",
                admin_warning: "WARNING: ADMIN_ONLY // ONE_TIME_INITIALIZATION",
                footer: "SENTINEL_VAULT // SECURE_TOKEN_PROTOCOL // 2026",
            },
        }
    }

    /// Softer variant for the hosted demo.
    pub fn aurora() -> Self {
        Self {
            name: "aurora",
            colors: ThemeColors {
                background: "#0b1120",
                primary: "#00d4ff",
                accent: "#8b5cf6",
                danger: "#f43f5e",
                warning: "#fbbf24",
            },
            copy: ThemeCopy {
                title: "Sentinel Vault",
                tagline: "Devnet preview",
                connect_prompt: "Connect a wallet to continue",
                vault_card: "Deposited in the vault",
                wallet_card: "Available to deposit",
                deposit_button: "Deposit",
                withdraw_button: "Withdraw",
                initialize_button: "Initialize vault",
                admin_warning: "Admin only: runs once per deployment",
                footer: "Sentinel Vault",
            },
        }
    }
}
