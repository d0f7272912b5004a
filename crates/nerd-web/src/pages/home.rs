//! Home Page
//!
//! Marketing landing page: navigation, hero section, and footer.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <div class="home">
            <nav class="navbar">
                <a href="/" class="logo">"Nerd"</a>
                <div class="nav-links">
                    <a href="/">"Home"</a>
                    <a href="/nerdai">"Nerd AI"</a>
                </div>
            </nav>

            <header class="hero">
                <h1>
                    "A cozy corner on the web to "
                    <span class="highlight">"grow your skills"</span>
                    "."
                </h1>
                <p class="subheading">
                    "Welcome! Nerd is a friendly guide, built by Quaigraine, to help you \
                     explore the world of technology at your own happy pace."
                </p>
                <a href="/nerdai" class="btn btn-primary">"Let's Begin"</a>

                <div class="annotation">"It's okay to be curious..."</div>
                <div class="annotation">"No question is too small!"</div>
                <div class="annotation">"You've totally got this."</div>
            </header>

            <footer class="footer">
                <p class="brand">"Nerd " <span>"by Quaigraine"</span></p>
                <p class="copyright">
                    {format!("© {year} Nerd. A welcoming space to learn and grow.")}
                </p>
            </footer>
        </div>
    }
}
