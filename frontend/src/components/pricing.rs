use std::rc::Rc;

use yew::prelude::*;

use crate::components::modals::PricingModal;
use crate::components::scramble_text::ScrambleText;
use crate::content::{Catalog, PricingTier, Roster};

#[derive(Properties, PartialEq)]
struct PricingCardProps {
    tier: PricingTier,
    on_select: Callback<()>,
}

#[function_component(PricingCard)]
fn pricing_card(props: &PricingCardProps) -> Html {
    let hovered = use_state(|| false);
    let tier = &props.tier;

    let on_enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let on_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let on_click = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(()))
    };

    html! {
        <div
            class={classes!("pricing-card", "cursor-pointer", tier.shows_recommended().then(|| "recommended"))}
            onmouseenter={on_enter}
            onmouseleave={on_leave}
            onclick={on_click}
        >
            {
                match (&tier.discount_label, tier.shows_recommended()) {
                    (Some(label), _) => html! { <span class="badge discount">{label.clone()}</span> },
                    (None, true) => html! { <span class="badge">{"RECOMMENDED"}</span> },
                    (None, false) => html! {},
                }
            }
            <p class="card-subtitle">{tier.service_level.clone()}</p>
            <h3>{tier.name.clone()}</h3>
            <p class="card-price">
                <ScrambleText text={tier.price.clone()} active={*hovered} />
                {
                    match &tier.original_price {
                        Some(original) => html! { <s class="original-price">{original.clone()}</s> },
                        None => html! {},
                    }
                }
            </p>
            <ul>
                { for tier.features.iter().map(|f| html! { <li>{f.clone()}</li> }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PricingProps {
    pub catalog: Rc<Catalog>,
    /// Reports whether this section's modal is open.
    pub on_modal_change: Callback<bool>,
}

#[function_component(Pricing)]
pub fn pricing(props: &PricingProps) -> Html {
    let roster = use_state(|| Roster::Male);
    let selected = use_state(|| None::<PricingTier>);

    {
        let on_modal_change = props.on_modal_change.clone();
        use_effect_with_deps(
            move |is_open| {
                on_modal_change.emit(*is_open);
                || ()
            },
            selected.is_some(),
        );
    }

    let pick_roster = |choice: Roster| {
        let roster = roster.clone();
        Callback::from(move |_: MouseEvent| roster.set(choice))
    };
    let close = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    html! {
        <section id="pricing" class="pricing">
            <h2 class="section-title">{"陪玩价格 // PRICING"}</h2>
            <div class="roster-toggle">
                <button
                    class={classes!((*roster == Roster::Male).then(|| "active"))}
                    onclick={pick_roster(Roster::Male)}
                >{"男陪 // MALE"}</button>
                <button
                    class={classes!((*roster == Roster::Female).then(|| "active"))}
                    onclick={pick_roster(Roster::Female)}
                >{"女陪 // FEMALE"}</button>
            </div>
            <div class="pricing-grid">
                { for props.catalog.tiers(*roster).iter().map(|tier| {
                    let on_select = {
                        let selected = selected.clone();
                        let tier = tier.clone();
                        Callback::from(move |_: ()| selected.set(Some(tier.clone())))
                    };
                    html! { <PricingCard key={tier.id.clone()} tier={tier.clone()} on_select={on_select} /> }
                }) }
            </div>
            {
                match &*selected {
                    Some(tier) => html! { <PricingModal tier={tier.clone()} on_close={close} /> },
                    None => html! {},
                }
            }
        </section>
    }
}
