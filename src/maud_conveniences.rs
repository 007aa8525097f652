use maud::{Markup, Render, html};

pub fn render_table<const N: usize>(titles: [&'static str; N], items: Vec<[Markup; N]>) -> Markup {
    html! {
        table class="w-full mt-3" {
            thead {
                tr class="bg-gray-100" {
                    @for title in titles {
                        th class="border border-gray-300 px-4 py-2 text-left" {(title)}
                    }
                }
            }
            tbody {
                @for row in items {
                    tr {
                        @for col in row {
                            td class="border border-gray-300 px-4 py-2" {(col)}
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-bold text-center mb-6" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mt-6 mb-4" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup) -> Markup {
    html! {
        div {
            label for=(id) class="block text-sm font-medium text-gray-700 mb-1" {(label)}
            (input)
        }
    }
}

///a text input which posts `value` back to `post_to` as the user types
pub fn live_input(
    id: &str,
    label: &str,
    value: &str,
    post_to: &str,
    input_type: Option<&str>,
    placeholder: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input type=(input_type.unwrap_or("text")) id=(id) name="value" value=(value) placeholder=[placeholder]
                hx-post=(post_to) hx-trigger="input changed delay:300ms, change" hx-swap="none"
                class="w-full px-3 py-2 border rounded-md";
        },
    )
}

///one labelled value in the card's identity block
pub fn detail(label: &str, value: &str) -> Markup {
    html! {
        div class="mb-2" {
            p class="text-sm text-gray-600" {(label)}
            p class="font-semibold" {(value)}
        }
    }
}
