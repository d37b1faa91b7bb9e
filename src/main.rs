fn main() {
    glyph_chess::visualization::run_interactive_terminal();
}
