use yew::prelude::*;

use crate::content::Mission;

#[derive(Properties, PartialEq)]
pub struct MissionsProps {
    pub missions: Vec<Mission>,
}

#[function_component(Missions)]
pub fn missions(props: &MissionsProps) -> Html {
    let hovered = use_state(|| None::<usize>);

    html! {
        <section id="mission" class="missions">
            <h2 class="section-title">{"精英课程 // ELITE PROGRAMS"}</h2>
            <div class="mission-grid">
                { for props.missions.iter().enumerate().map(|(i, mission)| {
                    let on_enter = {
                        let hovered = hovered.clone();
                        Callback::from(move |_: MouseEvent| hovered.set(Some(i)))
                    };
                    let on_leave = {
                        let hovered = hovered.clone();
                        Callback::from(move |_: MouseEvent| hovered.set(None))
                    };
                    html! {
                        <div
                            key={mission.id.clone()}
                            class={classes!("mission-card", (*hovered == Some(i)).then(|| "hovered"))}
                            onmouseenter={on_enter}
                            onmouseleave={on_leave}
                        >
                            <span class="mission-index">{format!("0{}", i + 1)}</span>
                            <h3>{mission.title.clone()}</h3>
                            <p class="mission-subtitle">{mission.subtitle.clone()}</p>
                            <p>{mission.desc.clone()}</p>
                            <ul>
                                { for mission.features.iter().map(|f| html! { <li>{f.clone()}</li> }) }
                            </ul>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}
