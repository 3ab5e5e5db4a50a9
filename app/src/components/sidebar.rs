use icondata::{AiHomeOutlined, AiSettingOutlined};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

use crate::components::icons;
use crate::nav::{GROUPS, MenuKey, TOP_LEVEL};

fn entry(key: MenuKey, selected: Memo<Option<MenuKey>>, nested: bool) -> impl IntoView {
    let is_selected = move || selected.get() == Some(key);
    view! {
        <li
            class="rounded-md hover:bg-gray-100"
            class:pl-6=nested
            class:bg-blue-50=is_selected
            class:text-blue-600=is_selected
        >
            <A href=key.route()>
                <span class="flex gap-2 items-center py-2 px-3">
                    {(key == MenuKey::Dashboard).then(|| icons::component(AiHomeOutlined, "size-4"))}
                    {key.label()}
                </span>
            </A>
        </li>
    }
}

/// Left-hand menu. The highlighted entry follows the current path.
pub fn component() -> impl IntoView {
    let location = use_location();
    let selected = Memo::new(move |_| MenuKey::from_path(&location.pathname.get()));

    view! {
        <aside class="p-3 w-68 bg-white border-r border-gray-200 shrink-0">
            <nav>
                <ul class="flex flex-col gap-1">
                    {TOP_LEVEL.iter().map(|key| entry(*key, selected, false)).collect_view()}
                    {GROUPS
                        .iter()
                        .map(|group| {
                            view! {
                                <li data-group=group.key>
                                    <div class="flex gap-2 items-center py-2 px-3 font-medium text-gray-500">
                                        {icons::component(AiSettingOutlined, "size-4")}
                                        {group.label}
                                    </div>
                                    <ul class="flex flex-col gap-1">
                                        {group
                                            .items
                                            .iter()
                                            .map(|key| entry(*key, selected, true))
                                            .collect_view()}
                                    </ul>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </aside>
    }
}
