// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{AdminCommands, Cli, Commands};
use commands::Context;
use commands::admin::EventFields;
use companion_core::models::{ChatContext, ItemFilters};

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log::error!("{}", e);
        if let Some(hint) = e.hint() {
            log::info!("{}", hint);
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            println!("companion_core {}", companion_core::version());
            return Ok(());
        }
        Commands::Templates { kind } => {
            return commands::templates::run(kind.as_deref(), args.json);
        }
        _ => {}
    }

    let mut ctx = Context::from_cli(&args)?;

    match &args.command {
        Commands::Version | Commands::Templates { .. } => {}
        Commands::Dashboard { event } => commands::attendee::dashboard(&ctx, event).await?,
        Commands::Program {
            event,
            day,
            item_type,
            location,
            search,
            available_only,
        } => {
            let filters = ItemFilters {
                day: day.clone(),
                item_type: item_type.clone(),
                location: location.clone(),
                search: search.clone(),
                available_only: *available_only,
            };
            commands::attendee::program(&ctx, event, filters).await?
        }
        Commands::Item { id } => commands::attendee::item(&ctx, id).await?,
        Commands::Register { item_id } => commands::attendee::register(&ctx, item_id).await?,
        Commands::Unregister { item_id } => commands::attendee::unregister(&ctx, item_id).await?,
        Commands::Registrations { event } => {
            commands::attendee::registrations(&ctx, event).await?
        }
        Commands::Speakers { event, id } => {
            commands::attendee::speakers(&ctx, event, id.as_deref()).await?
        }
        Commands::Map { event } => commands::attendee::map(&ctx, event).await?,
        Commands::News { event, id } => {
            commands::attendee::news(&ctx, event, id.as_deref()).await?
        }
        Commands::Chat {
            event,
            item,
            module,
            message,
        } => {
            let context = ChatContext {
                module_id: module.clone(),
                item_id: item.clone(),
            };
            commands::chat::run(&ctx, event, context, message.as_deref()).await?
        }
        Commands::Login { username, password } => {
            commands::auth::login(&mut ctx, username, password).await?
        }
        Commands::Logout => commands::auth::logout(&mut ctx)?,
        Commands::Admin { command } => run_admin(&ctx, command).await?,
    }

    Ok(())
}

async fn run_admin(ctx: &Context, command: &AdminCommands) -> Result<()> {
    use commands::{admin, auth};

    match command {
        AdminCommands::Whoami => auth::whoami(ctx).await,
        AdminCommands::Events => admin::events(ctx).await,
        AdminCommands::CreateEvent {
            title,
            start,
            end,
            description,
            location,
            status,
        } => {
            let input = EventFields {
                title: Some(title.as_str()),
                start: Some(start.as_str()),
                end: Some(end.as_str()),
                description: description.as_deref(),
                location: location.as_deref(),
                status: Some(status.as_str()),
            };
            admin::create_event(ctx, input).await
        }
        AdminCommands::UpdateEvent {
            id,
            title,
            start,
            end,
            description,
            location,
            status,
        } => {
            let input = EventFields {
                title: title.as_deref(),
                start: start.as_deref(),
                end: end.as_deref(),
                description: description.as_deref(),
                location: location.as_deref(),
                status: status.as_deref(),
            };
            admin::update_event(ctx, id, input).await
        }
        AdminCommands::DeleteEvent { id, yes } => admin::delete_event(ctx, id, *yes).await,
        AdminCommands::ModuleTypes => admin::module_types(ctx).await,
        AdminCommands::Modules { event } => admin::modules(ctx, event).await,
        AdminCommands::Fields { event, module, all } => {
            admin::show_fields(ctx, event, module, *all).await
        }
        AdminCommands::Toggle { event, module } => admin::toggle(ctx, event, module).await,
        AdminCommands::Rename {
            event,
            module,
            name,
        } => admin::rename(ctx, event, module, name).await,
        AdminCommands::Move { event, from, to } => {
            admin::move_module(ctx, event, *from, *to).await
        }
        AdminCommands::Add { event, kind } => admin::add(ctx, event, kind).await,
        AdminCommands::Remove { event, module, yes } => {
            admin::remove(ctx, event, module, *yes).await
        }
        AdminCommands::Set {
            event,
            module,
            field,
            value,
        } => admin::set(ctx, event, module, field, value).await,
    }
}
