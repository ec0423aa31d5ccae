use log::warn;
use yew::prelude::*;

use crate::components::scramble_text::use_scramble;
use crate::scramble::ScrambleSettings;
use crate::scroll::DomGeometry;

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_open_shop_info: Callback<()>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let apex = use_scramble("APEX".into(), ScrambleSettings::hero());
    let predator = use_scramble("PREDATOR".into(), ScrambleSettings::hero());

    let on_apex_hover = {
        let apex = apex.clone();
        Callback::from(move |_: MouseEvent| apex.start())
    };
    let on_predator_hover = {
        let predator = predator.clone();
        Callback::from(move |_: MouseEvent| predator.start())
    };

    let scroll_to_mission = Callback::from(|_: MouseEvent| {
        if let Err(err) = DomGeometry::from_window().and_then(|dom| dom.scroll_into_view("mission")) {
            warn!("{}", err);
        }
    });
    let open_shop_info = {
        let on_open_shop_info = props.on_open_shop_info.clone();
        Callback::from(move |_: MouseEvent| on_open_shop_info.emit(()))
    };

    html! {
        <div id="hero" class="hero">
            <span class="hero-badge">{"SEASON 22 RANKED"}</span>
            <h1 class="hero-title">
                <span class="hero-line" onmouseenter={on_apex_hover}>{apex.display()}</span>
                <span class="hero-line accent" onmouseenter={on_predator_hover}>{predator.display()}</span>
                <span class="hero-tagline">{"登峰造极 // BECOME LEGEND"}</span>
            </h1>
            <p class="hero-copy">
                {"如果你想成为最强，就必须击败最强。"}
                <br />
                <span class="accent">{"/// 捍卫者已部署 /// 猎杀开始"}</span>
            </p>
            <div class="hero-actions">
                <button class="cta primary" onclick={scroll_to_mission}>{"立即上分 // BOOST NOW"}</button>
                <button class="cta secondary" onclick={open_shop_info}>{"战队档案 // CLAN INFO"}</button>
            </div>
        </div>
    }
}
