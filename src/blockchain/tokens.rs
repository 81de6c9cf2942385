// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registry of well-known SPL token mints.
//!
//! The registry is a closed set: anything that is not one of these mints is
//! rejected at the boundary with [`UnknownToken`].

use std::{fmt, str::FromStr};

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_client::address::get_associated_token_address_with_program_id;

pub const USDC_MINT: Pubkey = solana_sdk::pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
pub const USDT_MINT: Pubkey = solana_sdk::pubkey!("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB");
pub const USDS_MINT: Pubkey = solana_sdk::pubkey!("USDSwr9ApdHk5bvJKMjzff41FfuX8bSxdKcR81vTwcA");
pub const WSOL_MINT: Pubkey = solana_sdk::pubkey!("So11111111111111111111111111111111111111112");
pub const JITOSOL_MINT: Pubkey =
    solana_sdk::pubkey!("J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn");
pub const BSOL_MINT: Pubkey = solana_sdk::pubkey!("bSo13r4TkiE4KumL71LsHTPpL2euBYLFx6h9HP3piy1");
pub const MSOL_MINT: Pubkey = solana_sdk::pubkey!("mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So");
pub const BONK_MINT: Pubkey = solana_sdk::pubkey!("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263");

/// Known tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Usdc,
    Usdt,
    Usds,
    Sol,
    JitoSol,
    BSol,
    MSol,
    Bonk,
}

/// Mints accepted as Lulo deposit assets.
pub type LuloDepositAsset = Token;

impl Token {
    /// Every registry entry, in declaration order.
    pub const ALL: [Token; 8] = [
        Token::Usdc,
        Token::Usdt,
        Token::Usds,
        Token::Sol,
        Token::JitoSol,
        Token::BSol,
        Token::MSol,
        Token::Bonk,
    ];

    /// Symbolic name (e.g. "USDC", "jitoSOL").
    pub const fn symbol(self) -> &'static str {
        match self {
            Token::Usdc => "USDC",
            Token::Usdt => "USDT",
            Token::Usds => "USDS",
            Token::Sol => "SOL",
            Token::JitoSol => "jitoSOL",
            Token::BSol => "bSOL",
            Token::MSol => "mSOL",
            Token::Bonk => "BONK",
        }
    }

    /// Base58 mint address.
    pub const fn address(self) -> &'static str {
        match self {
            Token::Usdc => "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            Token::Usdt => "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB",
            Token::Usds => "USDSwr9ApdHk5bvJKMjzff41FfuX8bSxdKcR81vTwcA",
            Token::Sol => "So11111111111111111111111111111111111111112",
            Token::JitoSol => "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn",
            Token::BSol => "bSo13r4TkiE4KumL71LsHTPpL2euBYLFx6h9HP3piy1",
            Token::MSol => "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So",
            Token::Bonk => "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
        }
    }

    /// Mint public key.
    pub const fn mint(self) -> Pubkey {
        match self {
            Token::Usdc => USDC_MINT,
            Token::Usdt => USDT_MINT,
            Token::Usds => USDS_MINT,
            Token::Sol => WSOL_MINT,
            Token::JitoSol => JITOSOL_MINT,
            Token::BSol => BSOL_MINT,
            Token::MSol => MSOL_MINT,
            Token::Bonk => BONK_MINT,
        }
    }

    /// Look up the registry entry for a mint.
    pub fn from_mint(mint: &Pubkey) -> Option<Token> {
        Token::ALL.into_iter().find(|token| token.mint() == *mint)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Input matched neither a registry symbol nor a registry mint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown token: {0}")]
pub struct UnknownToken(pub String);

impl FromStr for Token {
    type Err = UnknownToken;

    /// Accepts a symbol (case-insensitive) or a registry mint address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if let Some(token) = Token::ALL
            .into_iter()
            .find(|token| token.symbol().eq_ignore_ascii_case(value))
        {
            return Ok(token);
        }

        Pubkey::from_str(value)
            .ok()
            .and_then(|mint| Token::from_mint(&mint))
            .ok_or_else(|| UnknownToken(value.to_string()))
    }
}

/// Whether `program` is a token program that can own mints (SPL Token or Token-2022).
pub fn is_token_program(program: &Pubkey) -> bool {
    *program == spl_token::ID || *program == spl_token_2022::ID
}

/// Derive the associated token account holding `mint` for `wallet`.
///
/// `token_program` is the program that owns the mint account.
pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(wallet, mint, token_program)
}
