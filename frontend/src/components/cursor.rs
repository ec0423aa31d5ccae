use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CursorProps {
    pub x: f64,
    pub y: f64,
    pub clicking: bool,
    pub hovering: bool,
}

#[function_component(Cursor)]
pub fn cursor(props: &CursorProps) -> Html {
    let idle = !props.clicking && !props.hovering;
    let ring_class = classes!(
        "cursor-ring",
        props.clicking.then(|| "clicking"),
        (props.hovering && !props.clicking).then(|| "hovering"),
    );
    let dot_class = classes!(
        "cursor-dot",
        props.clicking.then(|| "clicking"),
        props.hovering.then(|| "hovering"),
    );

    html! {
        <div class="custom-cursor" style={format!("left: {}px; top: {}px;", props.x, props.y)}>
            <div class={dot_class}></div>
            <div class={ring_class}></div>
            {
                if idle {
                    html! {
                        <>
                            <div class="cursor-cross horizontal"></div>
                            <div class="cursor-cross vertical"></div>
                        </>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
