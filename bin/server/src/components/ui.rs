//! Presentational primitives: button, label, avatar, dropdown menu, icons.
//!
//! None of these attach behaviour. The dropdown is a native
//! `<details>`/`<summary>` pair so it opens without script.

use leptos::prelude::*;

/// A styled button.
#[component]
pub fn Button(
    /// Extra classes appended to the base `button` class.
    #[prop(optional, into)]
    class: Option<String>,
    /// The `type` attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match class {
        Some(extra) => format!("button {extra}"),
        None => "button".to_string(),
    };

    view! {
        <button type=button_type class=class>
            {children()}
        </button>
    }
}

/// A form label.
#[component]
pub fn Label(
    /// Id of the input this label describes.
    for_id: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <label for=for_id class="label">
            {children()}
        </label>
    }
}

/// A round avatar image with initials underneath as fallback.
#[component]
pub fn Avatar(src: &'static str, fallback: &'static str) -> impl IntoView {
    view! {
        <span class="avatar">
            <span class="avatar-fallback">{fallback}</span>
            <img class="avatar-image" src=src alt=fallback/>
        </span>
    }
}

/// Dropdown menu container.
#[component]
pub fn DropdownMenu(children: Children) -> impl IntoView {
    view! { <details class="dropdown">{children()}</details> }
}

/// The element that opens the dropdown.
#[component]
pub fn DropdownMenuTrigger(children: Children) -> impl IntoView {
    view! { <summary class="dropdown-trigger">{children()}</summary> }
}

/// The panel shown while the dropdown is open.
#[component]
pub fn DropdownMenuContent(children: Children) -> impl IntoView {
    view! {
        <div class="dropdown-content" role="menu">
            {children()}
        </div>
    }
}

/// A non-interactive heading inside the dropdown.
#[component]
pub fn DropdownMenuLabel(children: Children) -> impl IntoView {
    view! { <div class="dropdown-label">{children()}</div> }
}

/// A horizontal rule between dropdown groups.
#[component]
pub fn DropdownMenuSeparator() -> impl IntoView {
    view! { <div class="dropdown-separator" role="separator"></div> }
}

/// A dropdown entry.
#[component]
pub fn DropdownMenuItem(children: Children) -> impl IntoView {
    view! {
        <div class="dropdown-item" role="menuitem" tabindex="-1">
            {children()}
        </div>
    }
}

/// Plus sign icon.
#[component]
pub fn PlusIcon() -> impl IntoView {
    view! {
        <svg
            class="icon"
            width="15"
            height="15"
            viewBox="0 0 15 15"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
            aria-hidden="true"
        >
            <path
                d="M8 2.75C8 2.47386 7.77614 2.25 7.5 2.25C7.22386 2.25 7 2.47386 7 2.75V7H2.75C2.47386 7 2.25 7.22386 2.25 7.5C2.25 7.77614 2.47386 8 2.75 8H7V12.25C7 12.5261 7.22386 12.75 7.5 12.75C7.77614 12.75 8 12.5261 8 12.25V8H12.25C12.5261 8 12.75 7.77614 12.75 7.5C12.75 7.22386 12.5261 7 12.25 7H8V2.75Z"
                fill="currentColor"
                fill-rule="evenodd"
                clip-rule="evenodd"
            ></path>
        </svg>
    }
}
