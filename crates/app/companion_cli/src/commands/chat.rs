use std::io::{BufRead, Write};

use companion_core::conversation::{Conversation, Message};
use companion_core::models::{AssistantAction, ChatContext};

use super::Context;
use crate::Result;
use crate::cli::EventArg;

fn print_message(message: &Message) {
    println!("{}", message.content);
    for action in &message.actions {
        match action {
            AssistantAction::OpenMap { location_id, .. } => {
                println!("  * {} (companion map, location {location_id})", action.label())
            }
            AssistantAction::OpenAdmin { url, .. } => println!(
                "  * {} ({})",
                action.label(),
                url.as_deref().unwrap_or("companion admin")
            ),
        }
    }
}

pub async fn run(
    ctx: &Context,
    arg: &EventArg,
    context: ChatContext,
    message: Option<&str>,
) -> Result<()> {
    match message {
        Some(message) => ask_once(ctx, arg, context, message).await,
        None => interactive(ctx, arg, context).await,
    }
}

async fn ask_once(ctx: &Context, arg: &EventArg, context: ChatContext, message: &str) -> Result<()> {
    let event_id = ctx.event_id(arg).await?;
    let mut conversation = Conversation::new(event_id, None);
    let request = conversation.prepare(message, Some(context))?;
    let reply = ctx.client.chat(&request).await?;
    if ctx.emit_json(&reply)? {
        return Ok(());
    }
    print_message(conversation.record_reply(reply));
    Ok(())
}

async fn interactive(ctx: &Context, arg: &EventArg, context: ChatContext) -> Result<()> {
    let event = match &arg.event {
        Some(id) => ctx.client.event(id).await?,
        None => ctx.client.active_event().await?,
    };
    let mut conversation = Conversation::new(event.id, Some(event.title.as_str()));
    for message in conversation.messages() {
        print_message(message);
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        let request = match conversation.prepare(input, Some(context.clone())) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };
        let reply = match ctx.client.chat(&request).await {
            Ok(reply) => conversation.record_reply(reply),
            Err(e) => {
                log::warn!("assistant request failed: {e}");
                conversation.record_failure()
            }
        };
        print_message(reply);
    }
    Ok(())
}
