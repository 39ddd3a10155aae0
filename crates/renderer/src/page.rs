//! Initial HTML page: canvases, label placement and the client-side poll loop.

use crate::axis::{CanvasGeometry, ViewWindow};
use crate::engine::{hlabel_values, vlabel_values, NUM_HLABEL, NUM_VLABEL};

/// Grid spacing of the border canvas, in pixels.
const GRID_STEP: u32 = 40;

/// Client routine that fetches `update.js` and evaluates it.  Every payload
/// ends by calling `poll()` again; failed requests retry after a second.
const POLL_SCRIPT: &str = r#"
    function poll() {
      var xmlhttp = new XMLHttpRequest();
      xmlhttp.open("GET", "update.js", true);
      xmlhttp.onreadystatechange = function() {
        if (xmlhttp.readyState == 4) {
          if (xmlhttp.status == 200) {
            eval(xmlhttp.responseText);
          } else {
            setTimeout(poll, 1000);
          }
        }
      };
      xmlhttp.send(null);
    }

    function setscale(scale) {
      var xmlhttp = new XMLHttpRequest();
      xmlhttp.open("GET", "setscale?SCALE=" + scale, true);
      xmlhttp.send(null);
    }

    window.onload = function() {
      draw_border();
      poll();
    };
"#;

pub(crate) struct PageParams<'a> {
    pub title:         &'a str,
    pub geometry:      CanvasGeometry,
    pub window:        ViewWindow,
    pub scale_choices: &'a [u32],
}

pub(crate) fn full_page(p: &PageParams<'_>) -> String {
    let CanvasGeometry { width, height } = p.geometry;
    let graph_css = graph_css(&p.window);

    format!(
        r#"<html>
  <head>
  <title>{title}</title>
  <style type="text/css">
    canvas {{position: absolute}}
    span {{position: absolute}}
    canvas#border {{ {graph_css} }}
    canvas#graph {{ {graph_css} }}
    div#vlabel span {{text-align: right; width: 30px }}
    div#hlabel span {{text-align: left; width: 30px }}
    span#updated {{ left: 0px; top: 10px }}
{vlabel_css}{hlabel_css}  </style>

  <script type="text/javascript" id="gscript">
{border_script}  </script>

  <script type="text/javascript" id="main">{POLL_SCRIPT}  </script>
  </head>
  <body>
    <span id="updated"></span>
    <canvas id="border" width="{width}px" height="{height}px"></canvas>
    <canvas id="graph" width="{width}px" height="{height}px"></canvas>
    <div id="vlabel">
{vlabel_html}    </div>
    <div id="hlabel">
{hlabel_html}    </div>
    Time Scale:
{scale_inputs}  </body>
</html>
"#,
        title = escape_html(p.title),
        vlabel_css = vlabel_css(p.geometry),
        hlabel_css = hlabel_css(p.geometry),
        border_script = border_script(p.geometry),
        vlabel_html = label_html("vlabel", &vlabel_values(&p.window)),
        hlabel_html = label_html("hlabel", &hlabel_values(&p.window)),
        scale_inputs = scale_inputs(p.scale_choices, p.window.scale),
    )
}

/// Canvas offset: leave room on the left for the widest vertical label.
fn graph_css(window: &ViewWindow) -> String {
    let widest = format!("{:.2}", window.maxy).len() as u32;
    format!("left: {}px; top: 50px", widest * 12)
}

fn vlabel_css(geometry: CanvasGeometry) -> String {
    let base = geometry.height + 40;
    let dy = geometry.height / NUM_VLABEL;
    (0..=NUM_VLABEL)
        .map(|i| format!("    span#vlabel{i} {{ left: 0px; top: {}px }}\n", base - dy * i))
        .collect()
}

fn hlabel_css(geometry: CanvasGeometry) -> String {
    let dx = geometry.width / NUM_HLABEL;
    let top = geometry.height + 50;
    (0..=NUM_HLABEL)
        .map(|i| format!("    span#hlabel{i} {{ left: {}px; top: {top}px }}\n", dx * i + 40))
        .collect()
}

fn border_script(geometry: CanvasGeometry) -> String {
    let CanvasGeometry { width, height } = geometry;
    format!(
        r#"    function draw_border() {{
      var canctx = document.getElementById('border').getContext('2d');
      canctx.rect(0, 0, {width}, {height});
      canctx.stroke();

      canctx.strokeStyle = 'rgb(0, 128, 128)';
      canctx.lineWidth = 0.5;

      var cnt = 0;
      while (cnt < {height}) {{
        cnt += {GRID_STEP};
        canctx.beginPath();
        canctx.moveTo(0, cnt);
        canctx.lineTo({width}, cnt);
        canctx.stroke();
      }}

      cnt = 0;
      while (cnt < {width}) {{
        cnt += {GRID_STEP};
        canctx.beginPath();
        canctx.moveTo(cnt, 0);
        canctx.lineTo(cnt, {height});
        canctx.stroke();
      }}
    }}
"#
    )
}

fn label_html(prefix: &str, values: &[f64]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("      <span id=\"{prefix}{i}\"> {v:.2} </span>\n"))
        .collect()
}

fn scale_inputs(choices: &[u32], current: f64) -> String {
    choices
        .iter()
        .map(|&c| {
            let checked = if f64::from(c) == current { " checked" } else { "" };
            format!(
                "    <input type=\"radio\" name=\"sc\" onClick=\"setscale(this.value);\" value=\"{c}\"{checked}/> {c}\n"
            )
        })
        .collect()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::DataRange;

    fn params<'a>(window: ViewWindow, choices: &'a [u32]) -> PageParams<'a> {
        PageParams {
            title: "mem <used>",
            geometry: CanvasGeometry::new(600, 400),
            window,
            scale_choices: choices,
        }
    }

    #[test]
    fn vertical_labels_count_up_from_the_bottom() {
        let css = vlabel_css(CanvasGeometry::new(600, 400));
        assert!(css.contains("span#vlabel0 { left: 0px; top: 440px }"));
        assert!(css.contains("span#vlabel10 { left: 0px; top: 40px }"));
        assert_eq!(css.lines().count(), 11);
    }

    #[test]
    fn horizontal_labels_are_evenly_spaced() {
        let css = hlabel_css(CanvasGeometry::new(600, 400));
        assert!(css.contains("span#hlabel0 { left: 40px; top: 450px }"));
        assert!(css.contains("span#hlabel5 { left: 640px; top: 450px }"));
        assert_eq!(css.lines().count(), 6);
    }

    #[test]
    fn page_embeds_geometry_and_labels() {
        let window = ViewWindow::clip(DataRange::new(0.0, 100.0, 0.0, 1000.0), 10.0);
        let page = full_page(&params(window, &[1, 10, 100]));

        assert!(page.contains("<title>mem &lt;used&gt;</title>"));
        assert!(page.contains("canctx.rect(0, 0, 600, 400);"));
        assert!(page.contains("<canvas id=\"graph\" width=\"600px\" height=\"400px\">"));
        assert!(page.contains("<span id=\"vlabel10\"> 1000.00 </span>"));
        assert!(page.contains("<span id=\"hlabel0\"> 90.00 </span>"));
        assert!(page.contains("canvas#graph { left: 84px; top: 50px }"));
        assert!(page.contains("value=\"10\" checked/> 10"));
        assert!(page.contains("value=\"100\"/> 100"));
        assert!(page.contains("function poll()"));
    }
}
