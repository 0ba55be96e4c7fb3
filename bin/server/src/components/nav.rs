//! Top navigation bar.

use crate::components::ui::{
    Avatar, Button, DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuLabel,
    DropdownMenuSeparator, DropdownMenuTrigger, PlusIcon,
};
use leptos::prelude::*;

const AVATAR_URL: &str = "https://github.com/pinuya.png";

/// Header with the "new list" action and the account menu.
///
/// Neither the button nor the "Sair" item is wired to anything yet.
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <header class="nav">
            <div class="nav-brand">"app"</div>
            <div class="nav-actions">
                <Button>
                    <PlusIcon/>
                    "Nova Lista"
                </Button>

                <DropdownMenu>
                    <DropdownMenuTrigger>
                        <Avatar src=AVATAR_URL fallback="TA"/>
                    </DropdownMenuTrigger>
                    <DropdownMenuContent>
                        <DropdownMenuLabel>"Minha conta"</DropdownMenuLabel>
                        <DropdownMenuSeparator/>
                        <DropdownMenuItem>"Sair"</DropdownMenuItem>
                    </DropdownMenuContent>
                </DropdownMenu>
            </div>
        </header>
    }
}
