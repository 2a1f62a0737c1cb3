use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2M15 12h3")
}
pub fn icon_repeat() -> Html {
    icon_base("M17 1l4 4-4 4M3 11V9a4 4 0 014-4h14M7 23l-4-4 4-4M21 13v2a4 4 0 01-4 4H3")
}
pub fn icon_flag() -> Html {
    icon_base("M4 15s1-1 4-1 5 2 8 2 4-1 4-1V3s-1 1-4 1-5-2-8-2-4 1-4 1zM4 22v-7")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_pencil() -> Html {
    icon_base("M17 3a2.828 2.828 0 114 4L7.5 20.5 2 22l1.5-5.5L17 3z")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M19 6v14a2 2 0 01-2 2H7a2 2 0 01-2-2V6M8 6V4h8v2M10 11v6M14 11v6")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_arrow_up() -> Html {
    icon_base("M12 19V5M5 12l7-7 7 7")
}
pub fn icon_arrow_down() -> Html {
    icon_base("M12 5v14M19 12l-7 7-7-7")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7M14 8h6v6")
}
pub fn icon_trending_down() -> Html {
    icon_base("M3 7l6 6 4-4 7 7M14 16h6v-6")
}
