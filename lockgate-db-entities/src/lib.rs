#![allow(non_snake_case)]

pub mod PasswordPolicy;
pub mod Principal;
