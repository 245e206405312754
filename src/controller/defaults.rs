/// Example outline shown on first launch and after a reset.
pub const DEFAULT_OUTLINE: &str = "/
 .github
  README.md
  README.en.md
 public
  index.html
  js
   main.js
   socket.io.min.js
  css
   style.css
  images
   logo.png
   favicon-16x16.png
   favicon-32x32.png
   favicon-96x96.png
 src
  worker.js
 variants
  standalone
   server.js
   package.json
  redis-only
   server.js
   package.json
 server.js
 package.json
 LICENSE
 render.yaml";

/// Separator option used when nothing is stored.
pub const DEFAULT_APPEND_SLASH: bool = false;
