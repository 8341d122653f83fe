//! Toast Component
//!
//! Shows the latest notice and hides it after the configured delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let duration = ctx.state().config.notice_duration_ms;

    // Each new notice schedules its own dismissal
    Effect::new(move |_| {
        if let Some(notice) = ctx.notice.get() {
            let seq = notice.seq;
            spawn_local(async move {
                TimeoutFuture::new(duration).await;
                ctx.dismiss_notice(seq);
            });
        }
    });

    view! {
        {move || ctx.notice.get().map(|notice| {
            let class = if notice.is_error { "toast error" } else { "toast" };
            view! { <div class=class>{notice.message}</div> }
        })}
    }
}
