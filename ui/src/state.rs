use api_client::{FolioClient, TokenProvider};
use app_shell::{FetchGuard, Notice, Page, Theme};
use async_trait::async_trait;
use leptos::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// How long a transient notice stays on screen.
#[cfg(target_arch = "wasm32")]
const NOTICE_MS: u32 = 6_000;

#[derive(Clone)]
pub struct AppCtx {
    pub api_base: RwSignal<String>,
    pub page: RwSignal<Page>,
    pub theme: RwSignal<Theme>,
    pub notice: RwSignal<Option<Notice>>,
    notice_guard: FetchGuard,
}

#[cfg(target_arch = "wasm32")]
pub fn read_global(key: &str) -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

fn api_base_default() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        read_global("FOLIO_API_BASE").unwrap_or_else(|| "http://localhost:8000".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "http://localhost:8000".to_string()
    }
}

pub fn provide_app_ctx() -> AppCtx {
    let ctx = AppCtx {
        api_base: create_rw_signal(api_base_default()),
        page: create_rw_signal(Page::Dashboard),
        theme: create_rw_signal(Theme::Dark),
        notice: create_rw_signal(None),
        notice_guard: FetchGuard::new(),
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().expect("AppCtx not provided")
}

impl AppCtx {
    pub fn client(&self) -> FolioClient {
        FolioClient::from_base(self.api_base.get_untracked())
    }

    /// Show a transient notice; it dismisses itself unless a newer one
    /// replaced it first.
    pub fn notify(&self, notice: Notice) {
        self.notice.set(Some(notice));
        #[cfg(target_arch = "wasm32")]
        {
            let ticket = self.notice_guard.issue();
            let guard = self.notice_guard.clone();
            let slot = self.notice;
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(NOTICE_MS).await;
                if guard.is_current(ticket) {
                    slot.set(None);
                }
            });
        }
    }

    pub fn dismiss_notice(&self) {
        self.notice_guard.issue();
        self.notice.set(None);
    }
}

/// Token source backed by the external auth shell, which publishes the
/// signed-in user's bearer token to the `FOLIO_ID_TOKEN` global. Read per
/// call so refreshed tokens are picked up immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAuth;

#[async_trait(?Send)]
impl TokenProvider for SessionAuth {
    async fn id_token(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            read_global("FOLIO_ID_TOKEN").filter(|t| !t.is_empty())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}
