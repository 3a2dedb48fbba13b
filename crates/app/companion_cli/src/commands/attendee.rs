//! Attendee views: dashboard, program, speakers, map, news, registrations.

use chrono::{DateTime, Utc};
use companion_core::dashboard;
use companion_core::models::{EventItem, ItemFilters, Speaker};

use super::Context;
use crate::Result;
use crate::cli::EventArg;

fn when(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

pub async fn dashboard(ctx: &Context, arg: &EventArg) -> Result<()> {
    let event = match &arg.event {
        Some(id) => ctx.client.event(id).await?,
        None => ctx.client.active_event().await?,
    };
    let modules = ctx.client.event_modules(&event.id).await?;
    let tiles = dashboard::tiles(&modules);
    if ctx.emit_json(&tiles)? {
        return Ok(());
    }

    println!("{} ({})", event.title, event.status);
    println!(
        "{} - {}{}",
        event.date_start.format("%d %b %Y"),
        event.date_end.format("%d %b %Y"),
        event
            .location
            .as_deref()
            .map(|l| format!(", {l}"))
            .unwrap_or_default()
    );
    if tiles.is_empty() {
        println!("No modules enabled.");
    }
    for tile in &tiles {
        let badge = tile.badge.as_deref().map(|b| format!(" ({b})")).unwrap_or_default();
        println!("  {} {}{}", tile.icon, tile.title, badge);
    }
    Ok(())
}

fn print_item(item: &EventItem) {
    let full = if item.is_full { " FULL" } else { "" };
    println!(
        "{}  {:<14} {}  [{}{}]  {}",
        item.id,
        when(item.date_start),
        item.title,
        item.occupancy(),
        full,
        item.location_name.as_deref().unwrap_or("")
    );
}

pub async fn program(ctx: &Context, arg: &EventArg, filters: ItemFilters) -> Result<()> {
    let event_id = ctx.event_id(arg).await?;
    let items = ctx.client.event_items(&event_id, &filters).await?;
    if ctx.emit_json(&items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("Nothing matches.");
        let days = ctx.client.event_days(&event_id).await?;
        let types = ctx.client.event_types(&event_id).await?;
        if !days.is_empty() {
            println!("Days: {}", days.join(", "));
        }
        if !types.is_empty() {
            println!("Types: {}", types.join(", "));
        }
    }
    for item in &items {
        print_item(item);
    }
    Ok(())
}

pub async fn item(ctx: &Context, id: &str) -> Result<()> {
    let item = ctx.client.event_item(id).await?;
    if ctx.emit_json(&item)? {
        return Ok(());
    }
    println!("{}", item.title);
    println!("{} - {}", when(item.date_start), when(item.date_end));
    if let Some(location) = &item.location_name {
        println!("Location: {location}");
    }
    println!("Places: {}", item.occupancy());
    if let Some(description) = &item.description {
        println!("\n{description}");
    }
    for speaker in &item.speakers {
        print_speaker(speaker);
    }
    if ctx.client.credential().is_some() {
        let check = ctx.client.check_registration(id).await?;
        if check.registered {
            println!(
                "\nYou are registered ({}).",
                check.status.as_deref().unwrap_or("confirmed")
            );
        }
    }
    Ok(())
}

pub async fn register(ctx: &Context, item_id: &str) -> Result<()> {
    let result = ctx.client.register(item_id).await?;
    if !ctx.emit_json(&result)? {
        println!("{}", result.message);
    }
    Ok(())
}

pub async fn unregister(ctx: &Context, item_id: &str) -> Result<()> {
    let ack = ctx.client.cancel_registration(item_id).await?;
    if !ctx.emit_json(&ack)? {
        println!(
            "{}",
            ack.message.as_deref().unwrap_or("Registration cancelled")
        );
    }
    Ok(())
}

pub async fn registrations(ctx: &Context, arg: &EventArg) -> Result<()> {
    let regs = ctx.client.my_registrations(arg.event.as_deref()).await?;
    if ctx.emit_json(&regs)? {
        return Ok(());
    }
    if regs.is_empty() {
        println!("No registrations.");
    }
    for reg in &regs {
        println!(
            "{}  {:<10} {}",
            reg.event_item_id,
            reg.status,
            reg.event_item_title.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn print_speaker(speaker: &Speaker) {
    match speaker.affiliation() {
        Some(aff) => println!("  {} ({})  {}", speaker.name, aff, speaker.id),
        None => println!("  {}  {}", speaker.name, speaker.id),
    }
}

pub async fn speakers(ctx: &Context, arg: &EventArg, id: Option<&str>) -> Result<()> {
    if let Some(id) = id {
        let speaker = ctx.client.speaker(id).await?;
        if ctx.emit_json(&speaker)? {
            return Ok(());
        }
        print_speaker(&speaker);
        if let Some(bio) = &speaker.bio {
            println!("\n{bio}");
        }
        for (network, link) in &speaker.social_links {
            println!("  {network}: {link}");
        }
        return Ok(());
    }
    let event_id = ctx.event_id(arg).await?;
    let speakers = ctx.client.event_speakers(&event_id).await?;
    if ctx.emit_json(&speakers)? {
        return Ok(());
    }
    for speaker in &speakers {
        print_speaker(speaker);
    }
    Ok(())
}

pub async fn map(ctx: &Context, arg: &EventArg) -> Result<()> {
    let event_id = ctx.event_id(arg).await?;
    let map = ctx.client.map_data(&event_id).await?;
    if ctx.emit_json(&map)? {
        return Ok(());
    }
    for zone in &map.zones {
        let floor = zone.floor.map(|f| format!(" (floor {f})")).unwrap_or_default();
        println!("{}{}", zone.name, floor);
        for location in map.locations_in(&zone.id) {
            println!("  {}  {}", location.name, location.id);
        }
    }
    let unzoned: Vec<_> = map.unzoned_locations().collect();
    if !unzoned.is_empty() {
        println!("Other");
        for location in unzoned {
            println!("  {}  {}", location.name, location.id);
        }
    }
    Ok(())
}

pub async fn news(ctx: &Context, arg: &EventArg, id: Option<&str>) -> Result<()> {
    if let Some(id) = id {
        let article = ctx.client.news(id).await?;
        if ctx.emit_json(&article)? {
            return Ok(());
        }
        println!("{}  {}", when(article.published_at), article.title);
        if let Some(content) = &article.content {
            println!("\n{content}");
        }
        return Ok(());
    }
    let event_id = ctx.event_id(arg).await?;
    let articles = ctx.client.event_news(&event_id).await?;
    if ctx.emit_json(&articles)? {
        return Ok(());
    }
    if articles.is_empty() {
        println!("No news yet.");
    }
    for article in &articles {
        println!("{}  {}  {}", article.id, when(article.published_at), article.title);
    }
    Ok(())
}
