//! Content region that swaps section fragments in and out.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console shell owns the current section name. This component follows
//! it: fade out, fetch the fragment, drop the markup in, fade back in, then
//! mount whatever interactive views the section registers below the static
//! markup. A switch that lands after the user already moved on is dropped.

use leptos::prelude::*;

use crate::state::section::{SectionContent, SectionInit, begin_load, fetch_fragment, finish_load};
use crate::util::format::now_ms;
use crate::views::dashboard::DashboardView;
use crate::views::health::HealthView;
use crate::views::kubernetes::KubernetesView;
use crate::views::network_devices::NetworkDevicesView;
use crate::views::security::SecurityView;

#[component]
pub fn SectionHost(section: RwSignal<String>) -> impl IntoView {
    let content = RwSignal::new(SectionContent::Loading { name: section.get_untracked() });
    let host_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move |_| {
            let name = section.get();
            let (state, url) = begin_load(&name, now_ms());
            content.set(state);
            let Some(url) = url else {
                return;
            };
            leptos::task::spawn_local(async move {
                let result = fetch_fragment(&url).await;
                if section.get_untracked() != name {
                    return;
                }
                content.set(finish_load(&name, result));
            });
        });

        Effect::new(move |_| {
            let wants_parallax = content.with(|c| c.initializers().contains(&SectionInit::Parallax));
            if !wants_parallax {
                return;
            }
            request_animation_frame(move || {
                if let Some(el) = host_ref.get_untracked() {
                    crate::util::parallax::bind_hero(&el);
                    crate::util::parallax::bind_layers(&el);
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (begin_load, fetch_fragment, finish_load, now_ms);
    }

    let views = move || {
        content.with(SectionContent::initializers).iter().filter_map(|init| initializer_view(*init)).collect_view()
    };

    view! {
        <div class="section-host" class:section-hidden=move || content.with(|c| !c.is_visible())>
            <div class="section-fragment" node_ref=host_ref inner_html=move || content.with(SectionContent::html)></div>
            {views}
        </div>
    }
}

fn initializer_view(init: SectionInit) -> Option<AnyView> {
    match init {
        SectionInit::Dashboard => Some(view! { <DashboardView/> }.into_any()),
        SectionInit::NetworkDevices => Some(view! { <NetworkDevicesView/> }.into_any()),
        SectionInit::Kubernetes => Some(view! { <KubernetesView/> }.into_any()),
        SectionInit::Health => Some(view! { <HealthView/> }.into_any()),
        SectionInit::SecurityTabs => Some(view! { <SecurityView/> }.into_any()),
        SectionInit::Parallax => None,
    }
}
