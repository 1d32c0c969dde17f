//! Support chat.

use anyhow::{bail, Result};
use plantit_commerce::support::{ChatSession, SupportChannel};

use super::ChatArgs;
use crate::context::Context;

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let channel = args.channel.parse::<SupportChannel>()?;
    let mut chat = ChatSession::new(&ctx.config.support);

    let mut sent = 0;
    for message in &args.messages {
        if chat.send(channel, message).is_some() {
            sent += 1;
        }
    }
    if sent == 0 {
        bail!("Nothing to send: every message was blank");
    }

    // One reply per accepted message.
    let expected = chat.messages().len() + sent;
    let mut log = chat.subscribe();
    let waiting = format!("Waiting for {}", channel.display_name().to_lowercase());
    let spinner = ctx.output.spinner(&waiting);
    if log.wait_for(|m| m.len() >= expected).await.is_err() {
        ctx.output.debug("support replies stopped before all arrived");
    }
    spinner.finish_and_clear();

    let transcript = chat.transcript(channel);
    if ctx.output.is_json() {
        ctx.output.json(&transcript);
        return Ok(());
    }

    ctx.output
        .title(&format!("Plant.It Support: {}", channel.display_name()));
    for message in &transcript {
        ctx.output.chat_message(message);
    }

    Ok(())
}
