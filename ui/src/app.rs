use crate::{
    dashboard::DashboardPage, portfolio::PortfolioPage, screener::ScreenerPage,
    state::provide_app_ctx, stocks::StocksPage, theme::GLOBAL_CSS,
};
use app_shell::{Page, Theme};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = provide_app_ctx();
    let page = ctx.page;
    let theme = ctx.theme;

    let theme_class = create_memo(move |_| match theme.get() {
        Theme::Light => "folio-app light-theme".to_string(),
        Theme::Dark => "folio-app".to_string(),
    });

    let nav = move || {
        Page::ALL
            .into_iter()
            .map(|entry| {
                let active = move || page.get() == entry;
                view! {
                    <button
                        class="nav-tab"
                        class:active=active
                        on:click=move |_| page.set(entry)
                    >
                        {entry.label()}
                    </button>
                }
            })
            .collect_view()
    };

    let notice_toast = move || {
        ctx.notice.get().map(|notice| {
            let dismiss_ctx = ctx.clone();
            view! {
                <div class=format!("notice {}", notice.severity.tone_class())>
                    <span>{notice.message.clone()}</span>
                    <button on:click=move |_| dismiss_ctx.dismiss_notice()>"Dismiss"</button>
                </div>
            }
        })
    };

    view! {
        <Style>{GLOBAL_CSS}</Style>
        <main class=theme_class>
            <header class="topbar">
                <span class="brand-title">"Folio"</span>
                <nav class="nav-tabs">{nav}</nav>
                <button on:click=move |_| theme.update(|t| *t = t.toggled())>
                    {move || match theme.get() {
                        Theme::Dark => "Light mode",
                        Theme::Light => "Dark mode",
                    }}
                </button>
            </header>
            <div class="page">
                {move || match page.get() {
                    Page::Dashboard => view! { <DashboardPage/> }.into_view(),
                    Page::Stocks => view! { <StocksPage/> }.into_view(),
                    Page::Portfolio => view! { <PortfolioPage/> }.into_view(),
                    Page::Screener => view! { <ScreenerPage/> }.into_view(),
                }}
            </div>
            {notice_toast}
        </main>
    }
}
