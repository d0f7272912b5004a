//! Nerd AI Chat Page
//!
//! Presentation layer over [`ChatController`]: renders the session list,
//! the active conversation, and the input form, and drives the two
//! controller phases around the completion round trip.

use leptos::prelude::*;
use nerd_core::{ChatController, CompletionProvider, Submission};
use nerd_gemini::{GeminiClient, GeminiConfig};

use crate::components::MessageBubble;
use crate::storage::BrowserStorage;

/// Build-time API key; the controller itself only ever sees injected config
const API_KEY: &str = match option_env!("GEMINI_API_KEY") {
    Some(key) => key,
    None => "",
};

#[component]
pub fn NerdAiPage() -> impl IntoView {
    let controller = RwSignal::new(ChatController::new(BrowserStorage));
    let (input, set_input) = signal(String::new());
    let (sidebar_open, set_sidebar_open) = signal(false);

    let loading = move || controller.with(|c| c.is_loading());
    let user_name = move || controller.with(|c| c.user_name().to_string());
    let active_id = move || controller.with(|c| c.active_id());
    let messages = move || {
        controller.with(|c| {
            c.active_session()
                .map(|s| s.messages.clone())
                .unwrap_or_default()
        })
    };
    let history = move || {
        controller.with(|c| {
            c.chats()
                .iter()
                .map(|s| (s.id, s.title.clone()))
                .collect::<Vec<_>>()
        })
    };

    let send = move || {
        let text = input.get();
        let mut submission = Submission::Ignored;
        controller.update(|c| submission = c.submit(&text));

        match submission {
            Submission::Ignored => {}
            Submission::NameCaptured => set_input.set(String::new()),
            Submission::Pending(request) => {
                set_input.set(String::new());
                leptos::task::spawn_local(async move {
                    let client = GeminiClient::new(GeminiConfig::new(API_KEY));
                    let outcome = client.complete(&request).await;
                    controller.update(|c| c.resolve(outcome));
                });
            }
        }
    };

    view! {
        <div class="chat-page">
            <button
                class="sidebar-toggle"
                on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
            >
                {move || if sidebar_open.get() { "✕" } else { "☰" }}
            </button>

            <aside class="sidebar" class:open=move || sidebar_open.get()>
                <div class="sidebar-header">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            controller.update(|c| c.new_chat());
                            set_sidebar_open.set(false);
                        }
                    >
                        "New Chat"
                    </button>
                    <a href="/" class="btn">"Home"</a>
                </div>

                <ul class="history">
                    <For
                        each=history
                        key=|(id, _)| *id
                        children=move |(id, title)| {
                            view! {
                                <li
                                    class="history-item"
                                    class:active=move || active_id() == Some(id)
                                    on:click=move |_| {
                                        controller.update(|c| c.select_chat(id));
                                        set_sidebar_open.set(false);
                                    }
                                >
                                    <span>{title}</span>
                                    <button
                                        class="delete"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            controller.update(|c| c.delete_chat(id));
                                        }
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </aside>

            <main class="chat-main">
                <Show
                    when=move || !messages().is_empty()
                    fallback=move || {
                        view! {
                            <div class="welcome">
                                <h2>
                                    {move || {
                                        let name = user_name();
                                        if name.is_empty() {
                                            "Welcome, Friend!".to_string()
                                        } else {
                                            format!("Welcome, {name}!")
                                        }
                                    }}
                                </h2>
                                <p>
                                    "Your cosmic library of knowledge awaits. Ask me anything \
                                     to start a new conversation!"
                                </p>
                            </div>
                        }
                    }
                >
                    <div class="messages">
                        <For
                            each=move || messages().into_iter().enumerate()
                            key=|(index, _)| *index
                            children=move |(_, message)| view! { <MessageBubble message=message /> }
                        />
                        <Show when=loading>
                            <div class="message loading">"..."</div>
                        </Show>
                    </div>
                </Show>

                <form
                    class="input-area"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        send();
                    }
                >
                    <input
                        type="text"
                        placeholder=move || {
                            if user_name().is_empty() {
                                "Type your name to begin..."
                            } else {
                                "Ask a question..."
                            }
                        }
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        disabled=loading
                    />
                    <button
                        type="submit"
                        disabled=move || loading() || input.with(|t| t.trim().is_empty())
                    >
                        {move || if loading() { "..." } else { "Send" }}
                    </button>
                </form>
            </main>
        </div>
    }
}
