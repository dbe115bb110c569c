mod mem_graph;
