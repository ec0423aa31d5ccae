use yew::prelude::*;

use crate::content::{CoachingModule, PricingTier};

#[derive(Properties, PartialEq)]
struct OverlayProps {
    on_close: Callback<()>,
    #[prop_or_default]
    children: Children,
}

/// Backdrop click closes; clicks inside the panel do not.
#[function_component(Overlay)]
fn overlay(props: &OverlayProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_close_button = on_backdrop.clone();
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop}>
            <div class="modal-panel" onclick={stop}>
                <button class="modal-close" onclick={on_close_button}>{"✕"}</button>
                { for props.children.iter() }
            </div>
        </div>
    }
}

fn bullet_list(items: &[String]) -> Html {
    html! {
        <ul class="modal-list">
            { for items.iter().map(|item| html! { <li>{item.clone()}</li> }) }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct ShopInfoModalProps {
    pub on_close: Callback<()>,
}

#[function_component(ShopInfoModal)]
pub fn shop_info_modal(props: &ShopInfoModalProps) -> Html {
    html! {
        <Overlay on_close={props.on_close.clone()}>
            <h2>{"战队档案 // CLAN INFO"}</h2>
            <p>{"S12-S21 多赛季顶猎认证打手，纯绿手打，封号包赔，掉分免费补。"}</p>
            <ul class="modal-list">
                <li>{"纯绿手打 · 绝无科技"}</li>
                <li>{"极速效率 · 平均每小时 +200 RP"}</li>
                <li>{"售后无忧 · 掉分免费补"}</li>
            </ul>
        </Overlay>
    }
}

#[derive(Properties, PartialEq)]
pub struct CoachingModalProps {
    pub module: CoachingModule,
    pub on_close: Callback<()>,
}

#[function_component(CoachingModal)]
pub fn coaching_modal(props: &CoachingModalProps) -> Html {
    let module = &props.module;
    html! {
        <Overlay on_close={props.on_close.clone()}>
            <p class="modal-kicker">{module.subtitle.clone()}</p>
            <h2>{module.title.clone()}</h2>
            <p class="modal-price">{module.price.clone()}{" · "}{module.duration.clone()}</p>
            <p>{module.description.clone()}</p>
            <h3>{"课程大纲"}</h3>
            { bullet_list(&module.syllabus) }
            {
                if module.requirements.is_empty() {
                    html! {}
                } else {
                    html! {
                        <>
                            <h3>{"准备事项"}</h3>
                            { bullet_list(&module.requirements) }
                        </>
                    }
                }
            }
        </Overlay>
    }
}

#[derive(Properties, PartialEq)]
pub struct PricingModalProps {
    pub tier: PricingTier,
    pub on_close: Callback<()>,
}

#[function_component(PricingModal)]
pub fn pricing_modal(props: &PricingModalProps) -> Html {
    let tier = &props.tier;
    html! {
        <Overlay on_close={props.on_close.clone()}>
            <p class="modal-kicker">{tier.service_level.clone()}</p>
            <h2>{tier.name.clone()}</h2>
            <p class="modal-price">
                {tier.price.clone()}
                {
                    match &tier.original_price {
                        Some(original) => html! { <s class="original-price">{original.clone()}</s> },
                        None => html! {},
                    }
                }
            </p>
            <p>{tier.description.clone()}</p>
            { bullet_list(&tier.features) }
            <h3>{"专属权益"}</h3>
            { bullet_list(&tier.exclusive_perks) }
            <p class="modal-footnote">{tier.equipment_policy.clone()}</p>
        </Overlay>
    }
}
