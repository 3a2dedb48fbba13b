use companion_core::models::AdminLogin;

use super::Context;
use crate::Result;

pub async fn login(ctx: &mut Context, username: &str, password: &str) -> Result<()> {
    let login = AdminLogin {
        username: username.to_string(),
        password: password.to_string(),
    };
    ctx.client.login(&login, ctx.tokens.as_ref()).await?;
    println!("Logged in as {username}.");
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.client.logout(ctx.tokens.as_ref())?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let me = ctx.client.admin_me().await?;
    if !ctx.emit_json(&me)? {
        println!("{}", me.username);
    }
    Ok(())
}
