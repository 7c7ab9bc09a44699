pub mod roblox;
