use yew::prelude::*;

use crate::components::modals::CoachingModal;
use crate::content::CoachingModule;

#[derive(Properties, PartialEq)]
pub struct CoachingProps {
    pub modules: Vec<CoachingModule>,
    /// Reports whether this section's modal is open.
    pub on_modal_change: Callback<bool>,
}

#[function_component(Coaching)]
pub fn coaching(props: &CoachingProps) -> Html {
    let selected = use_state(|| None::<usize>);

    {
        let on_modal_change = props.on_modal_change.clone();
        use_effect_with_deps(
            move |selected| {
                on_modal_change.emit(selected.is_some());
                || ()
            },
            *selected,
        );
    }

    let close = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    html! {
        <section id="coaching" class="coaching">
            <h2 class="section-title">{"一对一指导 // COACHING"}</h2>
            <div class="coaching-grid">
                { for props.modules.iter().enumerate().map(|(i, module)| {
                    let open = {
                        let selected = selected.clone();
                        Callback::from(move |_: MouseEvent| selected.set(Some(i)))
                    };
                    html! {
                        <div key={module.id.clone()} class="coaching-card cursor-pointer" onclick={open}>
                            {
                                match &module.discount_label {
                                    Some(label) => html! { <span class="badge discount">{label.clone()}</span> },
                                    None => html! {},
                                }
                            }
                            <h3>{module.title.clone()}</h3>
                            <p class="card-subtitle">{module.subtitle.clone()}</p>
                            <p class="card-price">{module.price.clone()}</p>
                            <div class="tags">
                                { for module.tags.iter().map(|t| html! { <span class="tag">{t.clone()}</span> }) }
                            </div>
                        </div>
                    }
                }) }
            </div>
            {
                match (*selected).and_then(|i| props.modules.get(i)) {
                    Some(module) => html! { <CoachingModal module={module.clone()} on_close={close} /> },
                    None => html! {},
                }
            }
        </section>
    }
}
