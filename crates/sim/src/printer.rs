use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use paging::{Access, EngineView, TimelineCell};

/// Timeline columns per table; longer sequences wrap onto further tables.
const TIMELINE_WIDTH: usize = 16;
const EMPTY_FRAME: &str = "-";

pub fn format_view(view: &EngineView) -> String {
    let mut output = String::new();
    output.push_str(&format!("Physical Memory (Frames: {})\n", view.frames.len()));
    output.push_str(&format_frames(view));
    output.push('\n');
    output.push_str(&format!(
        "Page Access Sequence (Algorithm: {}, Faults: {})\n",
        view.policy, view.fault_count
    ));
    output.push_str(&format_timeline(&view.timeline()));
    output.push('\n');
    output.push_str(&format_step_summary(view));
    output
}

pub fn print_view(view: &EngineView) {
    println!("{}", format_view(view));
}

pub fn format_json(view: &EngineView) -> Result<String> {
    serde_json::to_string_pretty(view).context("serialize view")
}

fn format_frames(view: &EngineView) -> String {
    let mut table = Table::new();
    let mut header = vec![Cell::new("Frame")];
    header.extend(view.frames.iter().map(|slot| Cell::new(slot.frame)));
    table.set_header(header);

    let mut row = vec![Cell::new("Page")];
    row.extend(view.frames.iter().map(|slot| match slot.page {
        Some(page) => Cell::new(page),
        None => Cell::new(EMPTY_FRAME),
    }));
    table.add_row(row);
    table.to_string()
}

fn format_timeline(cells: &[TimelineCell]) -> String {
    cells
        .chunks(TIMELINE_WIDTH)
        .map(|chunk| {
            let mut table = Table::new();
            let mut header = vec![Cell::new("Step")];
            header.extend(chunk.iter().map(|cell| Cell::new(cell.index)));
            table.set_header(header);

            let mut pages = vec![Cell::new("Page")];
            pages.extend(chunk.iter().map(|cell| Cell::new(cell.page)));
            table.add_row(pages);

            let mut marks = vec![Cell::new("")];
            marks.extend(chunk.iter().map(|cell| Cell::new(timeline_mark(cell))));
            table.add_row(marks);
            table.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `*` marks the current page, `.` an earlier step, `F` a page fault.
fn timeline_mark(cell: &TimelineCell) -> String {
    let mut mark = String::new();
    if cell.highlighted {
        mark.push('*');
    } else if cell.reached {
        mark.push('.');
    }
    if cell.faulted {
        mark.push('F');
    }
    mark
}

fn format_step_summary(view: &EngineView) -> String {
    let last = view.sequence.len().saturating_sub(1);
    let position = format!("Step {}/{}", view.current_step, last);
    let Some(page) = view.current_page() else {
        return position;
    };
    match view.accesses.get(view.current_step) {
        None => format!("{} ({}): not replayed", position, page),
        Some(Access::Hit { frame }) => {
            format!("{} ({}): hit in frame {}", position, page, frame)
        }
        Some(Access::Fault {
            frame,
            evicted: None,
        }) => format!(
            "{} ({}): page fault, loaded into free frame {}",
            position, page, frame
        ),
        Some(Access::Fault {
            frame,
            evicted: Some(victim),
        }) => format!(
            "{} ({}): page fault, evicted {} from frame {}",
            position, page, victim, frame
        ),
    }
}
