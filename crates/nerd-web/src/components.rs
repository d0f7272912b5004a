//! UI Components

use leptos::prelude::*;
use nerd_core::Message;

/// Message bubble component
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let class = format!("message message-{}", message.role);

    view! {
        <div class=class>
            <span class="avatar">{message.role.to_string()}</span>
            <p class="content">{message.content.clone()}</p>
        </div>
    }
}
